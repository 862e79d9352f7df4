// Engine module - response processing (analysis, validation, aggregation)
// Sits between the provider parsers and the CLI

pub mod analysis;
pub mod config;
pub mod error;
pub mod handler;
pub mod summary;
pub mod validation;

pub use analysis::{INSIGHT_CONFIDENCE, InsightAnalyzer};
pub use config::{EngineConfig, resolve_config_path};
pub use error::{Error, Result};
pub use handler::{ResponseHandler, StreamAccumulator};
pub use summary::{InsightSummary, ResponseSummary, TokenSummary, summarize};
pub use validation::{DEFAULT_TOOL_COST, ToolCallValidator, ToolRegistry, ToolSpec};
