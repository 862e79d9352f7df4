use super::resolve_config;
use crate::args::Selection;
use crate::input::{read_json, read_jsonl};
use crate::output::{print_json, render_text};
use crate::types::OutputFormat;
use anyhow::Result;
use finsight_engine::{ResponseHandler, summarize};
use finsight_types::ProcessedFinancialResponse;
use std::path::Path;

pub struct Options {
    pub format: OutputFormat,
    pub full: bool,
    pub budget: Option<f64>,
}

pub fn handle(
    file: &Path,
    selection: &Selection,
    config_path: Option<&str>,
    options: Options,
) -> Result<()> {
    let raw = read_json(file)?;
    let handler = build_handler(selection, config_path, Some(&raw), options.budget)?;
    report(&handler.process(&raw), &options)
}

pub fn handle_stream(
    file: &Path,
    selection: &Selection,
    config_path: Option<&str>,
    options: Options,
) -> Result<()> {
    let chunks = read_jsonl(file)?;
    // Stream chunks name the model early (Anthropic only in the first event)
    let hint = chunks.iter().find(|c| crate::input::detect_model(c).is_some());
    let handler = build_handler(selection, config_path, hint, options.budget)?;
    report(&handler.process_stream(chunks), &options)
}

fn build_handler(
    selection: &Selection,
    config_path: Option<&str>,
    input: Option<&serde_json::Value>,
    budget: Option<f64>,
) -> Result<ResponseHandler> {
    let mut config = resolve_config(config_path, selection, input)?;
    if let Some(budget) = budget {
        if budget.is_nan() || budget < 0.0 {
            anyhow::bail!("--budget must be a non-negative number");
        }
        config.max_budget_usd = Some(budget);
    }
    Ok(ResponseHandler::from_config(&config)?)
}

fn report(processed: &ProcessedFinancialResponse, options: &Options) -> Result<()> {
    match (options.format, options.full) {
        (OutputFormat::Json, true) => print_json(processed),
        (OutputFormat::Json, false) => print_json(&summarize(processed)),
        (OutputFormat::Text, _) => {
            print!("{}", render_text(processed, crate::output::use_color()));
            Ok(())
        }
    }
}
