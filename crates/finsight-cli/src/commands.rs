use crate::args::{Cli, Commands};
use crate::handlers;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Parse { file, selection } => handlers::parse::handle(&file, &selection, config_path),

        Commands::Process {
            file,
            selection,
            format,
            full,
            budget,
        } => handlers::process::handle(
            &file,
            &selection,
            config_path,
            handlers::process::Options {
                format,
                full,
                budget,
            },
        ),

        Commands::Stream {
            file,
            selection,
            format,
            full,
            budget,
        } => handlers::process::handle_stream(
            &file,
            &selection,
            config_path,
            handlers::process::Options {
                format,
                full,
                budget,
            },
        ),

        Commands::Providers => handlers::providers::handle(),
    }
}
