use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::provider::Provider;
use crate::reasoning::ReasoningFormat;

/// Kind of a normalized response fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Text,
    Reasoning,
    Thinking,
    ToolUse,
    ToolResult,
    Image,
    Document,
    Unknown,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Reasoning => "reasoning",
            BlockType::Thinking => "thinking",
            BlockType::ToolUse => "tool_use",
            BlockType::ToolResult => "tool_result",
            BlockType::Image => "image",
            BlockType::Document => "document",
            BlockType::Unknown => "unknown",
        }
    }
}

/// Block payload: plain text for text-like blocks, a map for structured ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockContent {
    Text(String),
    Structured(Map<String, Value>),
}

impl BlockContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            BlockContent::Text(text) => Some(text),
            BlockContent::Structured(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            BlockContent::Text(_) => None,
            BlockContent::Structured(map) => Some(map),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_format: Option<ReasoningFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// One normalized fragment of a provider response.
///
/// UNKNOWN blocks are only built through [`UnifiedContentBlock::unknown`], which
/// requires the original fragment, so unrecognized content is never dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedContentBlock {
    pub block_type: BlockType,
    pub content: BlockContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BlockMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_provider_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UnifiedContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(BlockType::Text, BlockContent::Text(text.into()))
    }

    pub fn structured(block_type: BlockType, content: Map<String, Value>) -> Self {
        Self::new(block_type, BlockContent::Structured(content))
    }

    /// Fallback block for a fragment that could not be mapped.
    ///
    /// The content is the stringified fragment; the fragment itself is kept verbatim.
    pub fn unknown(raw: Value, error: Option<String>) -> Self {
        Self {
            block_type: BlockType::Unknown,
            content: BlockContent::Text(raw.to_string()),
            metadata: None,
            raw_provider_data: Some(raw),
            error,
        }
    }

    fn new(block_type: BlockType, content: BlockContent) -> Self {
        Self {
            block_type,
            content,
            metadata: None,
            raw_provider_data: None,
            error: None,
        }
    }

    /// Create a text-like block of any type (text, reasoning, thinking)
    pub fn with_text(block_type: BlockType, text: impl Into<String>) -> Self {
        Self::new(block_type, BlockContent::Text(text.into()))
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.metadata.get_or_insert_with(BlockMetadata::default).provider = Some(provider);
        self
    }

    pub fn with_reasoning_format(mut self, format: ReasoningFormat) -> Self {
        self.metadata
            .get_or_insert_with(BlockMetadata::default)
            .reasoning_format = Some(format);
        self
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw_provider_data = Some(raw);
        self
    }

    pub fn is_unknown(&self) -> bool {
        self.block_type == BlockType::Unknown
    }

    pub fn text_content(&self) -> Option<&str> {
        self.content.as_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_block_keeps_raw_fragment() {
        let raw = json!({"type": "citation", "cited_text": "10-K"});
        let block = UnifiedContentBlock::unknown(raw.clone(), None);

        assert!(block.is_unknown());
        assert_eq!(block.raw_provider_data, Some(raw.clone()));
        assert_eq!(block.text_content(), Some(raw.to_string().as_str()));
    }

    #[test]
    fn test_builder_methods_fill_metadata() {
        let block = UnifiedContentBlock::with_text(BlockType::Thinking, "hmm")
            .with_provider(Provider::Anthropic)
            .with_reasoning_format(ReasoningFormat::ClaudeThinking);

        let metadata = block.metadata.unwrap();
        assert_eq!(metadata.provider, Some(Provider::Anthropic));
        assert_eq!(metadata.reasoning_format, Some(ReasoningFormat::ClaudeThinking));
        assert_eq!(metadata.confidence, None);
    }

    #[test]
    fn test_block_serialization_skips_empty_fields() {
        let block = UnifiedContentBlock::text("Buy.");
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value, json!({"block_type": "text", "content": "Buy."}));
    }
}
