use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// LLM vendor whose response shape a parser understands.
///
/// The three built-in vendors are closed variants; `Custom` is the escape hatch
/// for parsers registered at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Provider {
    Anthropic,
    OpenAi,
    Google,
    Custom(String),
}

impl Provider {
    pub fn as_str(&self) -> &str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
            Provider::Google => "google",
            Provider::Custom(name) => name,
        }
    }

    pub fn builtin() -> [Provider; 3] {
        [Provider::Anthropic, Provider::OpenAi, Provider::Google]
    }

    /// Guess the provider from a model name by lower-cased substring match.
    ///
    /// Returns `None` when no known hint matches; callers decide the fallback.
    pub fn infer_from_model(model: &str) -> Option<Provider> {
        let lower = model.to_lowercase();
        if lower.contains("claude") {
            Some(Provider::Anthropic)
        } else if lower.contains("gpt") || lower.contains("o1") {
            Some(Provider::OpenAi)
        } else if lower.contains("gemini") || lower.contains("vertex") {
            Some(Provider::Google)
        } else {
            None
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Provider::Anthropic,
            "openai" | "gpt" => Provider::OpenAi,
            "google" | "gemini" | "vertex" => Provider::Google,
            _ => Provider::Custom(s.to_string()),
        })
    }
}

impl From<String> for Provider {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(provider) => provider,
            Err(never) => match never {},
        }
    }
}

impl From<Provider> for String {
    fn from(p: Provider) -> Self {
        p.as_str().to_string()
    }
}
