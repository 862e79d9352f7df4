use serde::Deserialize;
use serde_json::Value;

/// Chat Completions response
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct OpenAiResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ChoiceMessage {
    /// Plain string, array of content parts, or null when only tools are called
    #[serde(default)]
    pub content: Option<Value>,
    /// Present only on reasoning-capable models
    #[serde(default)]
    pub reasoning_content: Option<String>,
    /// Tool calls stay raw so one bad entry cannot fail the message
    #[serde(default)]
    pub tool_calls: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ToolCall {
    #[serde(default)]
    pub id: Option<String>,
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<EncodedArguments>,
}

/// Arguments are documented as a JSON string; some gateways send the object itself
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub(crate) enum EncodedArguments {
    Encoded(String),
    Structured(Value),
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub(crate) enum ContentPart {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct OpenAiUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub completion_tokens_details: Option<CompletionTokensDetails>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct CompletionTokensDetails {
    #[serde(default)]
    pub reasoning_tokens: Option<u64>,
}

/// Streaming chunk (`chat.completion.chunk`)
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct OpenAiChunk {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ChunkChoice {
    #[serde(default)]
    pub delta: Option<ChunkDelta>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}
