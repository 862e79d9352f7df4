// Error types
pub mod error;

// Trait-based architecture (public API)
pub mod traits;

// Provider implementations
pub mod anthropic;
pub mod google;
pub mod openai;

// Response builder
pub mod builder;

// Parser registry
pub mod registry;

// Traits
pub use traits::{ContentBlockParser, StreamDelta};

// Parsers
pub use anthropic::AnthropicParser;
pub use google::GoogleParser;
pub use openai::OpenAiParser;

// Registry
pub use registry::{
    DEFAULT_PROVIDER, ParserRegistry, ProviderMetadata, get_all_providers, get_provider_metadata,
    get_provider_names,
};

// Error types
pub use error::{Error, Result};
