use serde::{Deserialize, Serialize};

/// Origin format of a reasoning trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningFormat {
    ClaudeThinking,
    OpenaiReasoning,
    GeminiReasoning,
    TextTrace,
    Unknown,
}

/// Provider "thinking" output, kept apart from the final answer text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningTrace {
    pub format: ReasoningFormat,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

impl ReasoningTrace {
    pub fn new(format: ReasoningFormat, content: impl Into<String>) -> Self {
        Self {
            format,
            content: content.into(),
            token_count: None,
            stop_reason: None,
        }
    }

    pub fn with_token_count(mut self, token_count: Option<u64>) -> Self {
        self.token_count = token_count;
        self
    }
}
