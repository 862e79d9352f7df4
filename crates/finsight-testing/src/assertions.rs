//! Assertions over the CLI's JSON output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that a summary lists the expected insight types, in order.
pub fn assert_insight_types(summary: &Value, expected: &[&str]) -> Result<()> {
    let insights = summary["insights"]
        .as_array()
        .context("Expected 'insights' array in JSON")?;

    let types: Vec<&str> = insights
        .iter()
        .enumerate()
        .map(|(i, insight)| {
            insight["type"]
                .as_str()
                .with_context(|| format!("Insight {} missing type", i))
        })
        .collect::<Result<_>>()?;

    if types != expected {
        anyhow::bail!("Expected insight types {:?}, got {:?}", expected, types);
    }

    Ok(())
}

/// Assert the token block of a summary.
pub fn assert_tokens(summary: &Value, input: u64, output: u64) -> Result<()> {
    let tokens = &summary["tokens"];
    let actual = (
        tokens["input"].as_u64().context("Expected 'tokens.input'")?,
        tokens["output"].as_u64().context("Expected 'tokens.output'")?,
        tokens["total"].as_u64().context("Expected 'tokens.total'")?,
    );

    if actual != (input, output, input + output) {
        anyhow::bail!(
            "Expected tokens ({}, {}, {}), got {:?}",
            input,
            output,
            input + output,
            actual
        );
    }

    Ok(())
}

/// Assert the block types of a serialized `ParsedResponse`, in order.
pub fn assert_block_types(parsed: &Value, expected: &[&str]) -> Result<()> {
    let blocks = parsed["content_blocks"]
        .as_array()
        .context("Expected 'content_blocks' array in JSON")?;

    let types: Vec<&str> = blocks
        .iter()
        .filter_map(|b| b["block_type"].as_str())
        .collect();

    if types != expected {
        anyhow::bail!("Expected block types {:?}, got {:?}", expected, types);
    }

    Ok(())
}
