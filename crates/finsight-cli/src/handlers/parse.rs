use super::resolve_config;
use crate::args::Selection;
use crate::input::read_json;
use crate::output::print_json;
use anyhow::Result;
use finsight_engine::ResponseHandler;
use finsight_providers::ContentBlockParser;
use std::path::Path;

pub fn handle(file: &Path, selection: &Selection, config_path: Option<&str>) -> Result<()> {
    let raw = read_json(file)?;
    let config = resolve_config(config_path, selection, Some(&raw))?;
    let handler = ResponseHandler::from_config(&config)?;

    let parsed = handler.parser().safe_parse(&raw);
    print_json(&parsed)
}
