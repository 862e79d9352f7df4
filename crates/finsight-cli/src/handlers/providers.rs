use anyhow::Result;
use finsight_providers::get_all_providers;

pub fn handle() -> Result<()> {
    println!("{:<12} {:<18} DESCRIPTION", "PROVIDER", "MODEL HINTS");
    println!("{}", "-".repeat(80));

    for provider in get_all_providers() {
        println!(
            "{:<12} {:<18} {}",
            provider.name,
            provider.model_hints.join(", "),
            provider.description
        );
    }

    Ok(())
}
