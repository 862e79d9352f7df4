use crate::traits::ContentBlockParser;
use crate::{AnthropicParser, Error, GoogleParser, OpenAiParser, Result};
use finsight_types::Provider;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: &'static str,
    pub description: &'static str,
    /// Lower-case substrings of model names served by this provider
    pub model_hints: &'static [&'static str],
}

const PROVIDERS: &[ProviderMetadata] = &[
    ProviderMetadata {
        name: "anthropic",
        description: "Anthropic Messages API (content[] blocks)",
        model_hints: &["claude"],
    },
    ProviderMetadata {
        name: "openai",
        description: "OpenAI Chat Completions (choices[0].message)",
        model_hints: &["gpt", "o1"],
    },
    ProviderMetadata {
        name: "google",
        description: "Google Gemini generateContent (candidates[0].content.parts)",
        model_hints: &["gemini", "vertex"],
    },
];

pub fn get_all_providers() -> &'static [ProviderMetadata] {
    PROVIDERS
}

pub fn get_provider_names() -> Vec<&'static str> {
    PROVIDERS.iter().map(|p| p.name).collect()
}

pub fn get_provider_metadata(name: &str) -> Option<&'static ProviderMetadata> {
    PROVIDERS.iter().find(|p| p.name == name)
}

/// Provider used when a model name matches no hint
pub const DEFAULT_PROVIDER: Provider = Provider::Anthropic;

/// Parser factory keyed by provider.
///
/// Holds shared, immutable parsers; lookups hand out cheap `Arc` clones so one
/// registry can serve any number of concurrent callers.
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: HashMap<Provider, Arc<dyn ContentBlockParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ParserRegistry {
    /// Registry with no parsers at all
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Registry with the Anthropic, OpenAI and Google parsers
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Provider::Anthropic, AnthropicParser::new());
        registry.register(Provider::OpenAi, OpenAiParser::new());
        registry.register(Provider::Google, GoogleParser::new());
        registry
    }

    /// Register a parser, replacing any previous one for the same provider
    pub fn register(&mut self, provider: Provider, parser: impl ContentBlockParser + 'static) {
        self.register_arc(provider, Arc::new(parser));
    }

    pub fn register_arc(&mut self, provider: Provider, parser: Arc<dyn ContentBlockParser>) {
        if self.parsers.insert(provider.clone(), parser).is_some() {
            tracing::debug!(%provider, "replaced registered parser");
        }
    }

    pub fn contains(&self, provider: &Provider) -> bool {
        self.parsers.contains_key(provider)
    }

    pub fn providers(&self) -> Vec<Provider> {
        let mut providers: Vec<Provider> = self.parsers.keys().cloned().collect();
        providers.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        providers
    }

    /// Explicit lookup; a missing provider is a configuration error
    pub fn get(&self, provider: &Provider) -> Result<Arc<dyn ContentBlockParser>> {
        self.parsers
            .get(provider)
            .cloned()
            .ok_or_else(|| Error::UnknownProvider(provider.clone()))
    }

    /// Infer the parser from a model name, falling back to [`DEFAULT_PROVIDER`]
    pub fn for_model(&self, model: &str) -> Result<Arc<dyn ContentBlockParser>> {
        let provider = Provider::infer_from_model(model).unwrap_or_else(|| {
            tracing::warn!(
                model,
                fallback = %DEFAULT_PROVIDER,
                "model name matches no provider, using default parser"
            );
            DEFAULT_PROVIDER
        });
        self.get(&provider)
    }

    /// Infer the parser from a model name; unmatched names are an error
    pub fn for_model_strict(&self, model: &str) -> Result<Arc<dyn ContentBlockParser>> {
        let provider = Provider::infer_from_model(model)
            .ok_or_else(|| Error::UnrecognizedModel(model.to_string()))?;
        self.get(&provider)
    }
}
