pub mod parse;
pub mod process;
pub mod providers;

use crate::args::Selection;
use crate::input::detect_model;
use anyhow::{Result, bail};
use finsight_engine::EngineConfig;
use serde_json::Value;

/// Load the config file and apply command-line overrides.
///
/// Flags win over the file. When neither names a provider or model, the model
/// found in `input` is used.
pub fn resolve_config(
    config_path: Option<&str>,
    selection: &Selection,
    input: Option<&Value>,
) -> Result<EngineConfig> {
    let mut config = EngineConfig::load(config_path)?;

    if let Some(provider) = &selection.provider {
        config.provider = Some(provider.clone());
    } else if let Some(model) = &selection.model {
        config.provider = None;
        config.model = Some(model.clone());
    }
    if selection.strict {
        config.strict_inference = true;
    }

    if config.provider.is_none() && config.model.is_none() {
        config.model = input.and_then(detect_model);
        if config.model.is_none() {
            bail!("Cannot tell which provider produced the input; pass --provider or --model");
        }
    }

    tracing::debug!(
        provider = ?config.provider,
        model = ?config.model,
        strict = config.strict_inference,
        "resolved parser selection"
    );
    Ok(config)
}
