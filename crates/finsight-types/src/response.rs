use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::{BlockType, UnifiedContentBlock};
use crate::provider::Provider;
use crate::reasoning::ReasoningTrace;
use crate::tool::{ToolCallData, ToolResultData};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Sum of both counts, clamped at `u64::MAX`
    pub fn total(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Provider-independent view of one LLM response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResponse {
    pub provider: Provider,
    pub model: String,
    pub content_blocks: Vec<UnifiedContentBlock>,
    pub reasoning_traces: Vec<ReasoningTrace>,
    pub tool_calls: Vec<ToolCallData>,
    pub tool_results: Vec<ToolResultData>,
    /// TEXT block contents in order, joined by newline
    pub final_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    pub usage: TokenUsage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<Value>,
    #[serde(default)]
    pub parse_errors: Vec<String>,
}

impl ParsedResponse {
    /// Structurally complete response for input that could not be parsed at all
    pub fn failed(provider: Provider, model: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            content_blocks: Vec::new(),
            reasoning_traces: Vec::new(),
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
            final_text: String::new(),
            stop_reason: None,
            usage: TokenUsage::default(),
            raw_response: None,
            parse_errors: vec![error.into()],
        }
    }

    pub fn is_success(&self) -> bool {
        self.parse_errors.is_empty()
    }

    pub fn has_reasoning(&self) -> bool {
        !self.reasoning_traces.is_empty()
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    pub fn blocks_of(&self, block_type: BlockType) -> impl Iterator<Item = &UnifiedContentBlock> {
        self.content_blocks
            .iter()
            .filter(move |b| b.block_type == block_type)
    }

    /// All reasoning trace contents joined by newline
    pub fn reasoning_text(&self) -> String {
        self.reasoning_traces
            .iter()
            .map(|t| t.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Concatenate TEXT block contents in block order
pub fn assemble_final_text(blocks: &[UnifiedContentBlock]) -> String {
    blocks
        .iter()
        .filter(|b| b.block_type == BlockType::Text)
        .filter_map(|b| b.text_content())
        .collect::<Vec<_>>()
        .join("\n")
}
