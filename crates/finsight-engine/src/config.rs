use crate::validation::{DEFAULT_TOOL_COST, ToolCallValidator, ToolRegistry, ToolSpec};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. FINSIGHT_CONFIG environment variable (with tilde expansion)
/// 3. `<config dir>/finsight/config.toml`
///
/// Returns `None` only when the platform has no config directory.
pub fn resolve_config_path(explicit_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("FINSIGHT_CONFIG") {
        return Some(expand_tilde(&env_path));
    }

    dirs::config_dir().map(|dir| dir.join("finsight").join("config.toml"))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Pipeline settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Explicit provider; takes precedence over `model`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Model name used to infer the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Fail instead of defaulting when `model` matches no provider
    #[serde(default)]
    pub strict_inference: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_budget_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tool_cost: Option<f64>,
    /// Added to (or replacing) the built-in tool registry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,
}

impl EngineConfig {
    /// Load from the resolved path; a missing file yields defaults
    pub fn load(explicit_path: Option<&str>) -> Result<Self> {
        match resolve_config_path(explicit_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.check()?;
        tracing::debug!(path = %path.display(), tools = config.tools.len(), "loaded config");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject negative money amounts
    pub fn check(&self) -> Result<()> {
        let amounts = [
            ("max_budget_usd", self.max_budget_usd),
            ("default_tool_cost", self.default_tool_cost),
        ]
        .into_iter()
        .chain(self.tools.iter().map(|t| ("tools.cost_usd", t.cost_usd)));

        for (field, value) in amounts {
            if let Some(value) = value
                && (value.is_nan() || value < 0.0)
            {
                return Err(Error::Config(format!(
                    "{} must be a non-negative number, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }

    /// Built-in registry with the configured tools layered on top
    pub fn tool_registry(&self) -> ToolRegistry {
        let mut registry = ToolRegistry::builtin();
        for tool in &self.tools {
            registry.register(tool.clone());
        }
        registry
    }

    pub fn validator(&self) -> ToolCallValidator {
        let validator = ToolCallValidator::new(self.tool_registry())
            .with_default_cost(self.default_tool_cost.unwrap_or(DEFAULT_TOOL_COST));
        match self.max_budget_usd {
            Some(budget) => validator.with_budget(budget),
            None => validator,
        }
    }
}
