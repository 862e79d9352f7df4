use finsight_types::Provider;
use thiserror::Error;

/// Result type for finsight-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the providers layer
#[derive(Debug, Error)]
pub enum Error {
    /// No parser registered for the requested provider (deployment error)
    #[error("no parser registered for provider: {0}")]
    UnknownProvider(Provider),

    /// Model name matched none of the known provider hints
    #[error("cannot infer provider from model name: {0}")]
    UnrecognizedModel(String),

    /// Response did not deserialize into the provider's shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response deserialized but is missing required structure
    #[error("Parse error: {0}")]
    Parse(String),
}
