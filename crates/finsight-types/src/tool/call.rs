use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::args::ToolArguments;
use crate::provider::Provider;

/// One tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallData {
    pub tool_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    /// Always a map; undecodable arguments appear as `{"raw": "<original>"}`
    pub raw_input: Map<String, Value>,
    pub provider: Provider,
}

impl ToolCallData {
    pub fn new(
        tool_name: impl Into<String>,
        call_id: Option<String>,
        arguments: ToolArguments,
        provider: Provider,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            call_id,
            raw_input: arguments.into_input(),
            provider,
        }
    }

    pub fn input(&self, key: &str) -> Option<&Value> {
        self.raw_input.get(key)
    }
}

/// Outcome of a tool invocation already executed on the provider side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultData {
    pub call_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    pub result: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ToolResultData {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
