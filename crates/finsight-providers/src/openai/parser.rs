use crate::builder::ResponseBuilder;
use crate::traits::{ContentBlockParser, StreamDelta, expect_object};
use crate::{Error, Result};
use finsight_types::*;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::schema::*;

/// Model name used when an OpenAI response carries none
pub const UNKNOWN_MODEL: &str = "gpt-unknown";

/// Normalize an OpenAI Chat Completions response.
///
/// Only `choices[0]` is read. Block order: reasoning, text, then tool calls.
pub(crate) fn normalize_openai_response(raw: &Value, retain_raw: bool) -> Result<ParsedResponse> {
    expect_object(raw)?;
    let response = OpenAiResponse::deserialize(raw)?;

    let Some(choice) = response.choices.into_iter().next() else {
        return Err(Error::Parse("response has no choices".to_string()));
    };

    let model = response
        .model
        .unwrap_or_else(|| UNKNOWN_MODEL.to_string());
    let reasoning_tokens = response
        .usage
        .as_ref()
        .and_then(|u| u.completion_tokens_details.as_ref())
        .and_then(|d| d.reasoning_tokens);

    let mut builder = ResponseBuilder::new(Provider::OpenAi, model);
    let message = choice.message;

    if let Some(reasoning) = message.reasoning_content.filter(|r| !r.is_empty()) {
        builder.push_reasoning(
            BlockType::Reasoning,
            ReasoningFormat::OpenaiReasoning,
            &reasoning,
            reasoning_tokens,
            Value::String(reasoning.clone()),
        );
    }

    match message.content {
        None | Some(Value::Null) => {}
        Some(Value::String(text)) => {
            if !text.is_empty() {
                builder.push_text(&text, Value::String(text.clone()));
            }
        }
        Some(Value::Array(parts)) => {
            for (idx, part) in parts.into_iter().enumerate() {
                match ContentPart::deserialize(&part) {
                    Ok(ContentPart::Text { text }) => builder.push_text(&text, part),
                    Ok(ContentPart::Other) => builder.push_unknown(part),
                    Err(err) => {
                        builder.push_malformed(&format!("message.content[{}]", idx), part, err)
                    }
                }
            }
        }
        Some(other) => builder.push_unknown(other),
    }

    for (idx, call) in message.tool_calls.unwrap_or_default().into_iter().enumerate() {
        match ToolCall::deserialize(&call) {
            Ok(tool_call) => {
                let arguments = decode_arguments(tool_call.function.arguments);
                builder.push_tool_call(&tool_call.function.name, tool_call.id, arguments, call);
            }
            Err(err) => builder.push_malformed(&format!("message.tool_calls[{}]", idx), call, err),
        }
    }

    let usage = response
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(builder.finish(
        choice.finish_reason,
        usage,
        retain_raw.then(|| raw.clone()),
    ))
}

/// Undo the JSON-in-a-string encoding of function arguments
fn decode_arguments(arguments: Option<EncodedArguments>) -> ToolArguments {
    match arguments {
        None => ToolArguments::Decoded(Map::new()),
        Some(EncodedArguments::Encoded(encoded)) => ToolArguments::decode(&encoded),
        Some(EncodedArguments::Structured(value)) => ToolArguments::from_value(value),
    }
}

/// OpenAI response parser implementation
pub struct OpenAiParser {
    retain_raw: bool,
}

impl Default for OpenAiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAiParser {
    pub fn new() -> Self {
        Self { retain_raw: true }
    }

    pub fn retain_raw(mut self, retain: bool) -> Self {
        self.retain_raw = retain;
        self
    }
}

impl ContentBlockParser for OpenAiParser {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn unknown_model(&self) -> &str {
        UNKNOWN_MODEL
    }

    fn parse(&self, raw: &Value) -> Result<ParsedResponse> {
        normalize_openai_response(raw, self.retain_raw)
    }

    fn stream_delta(&self, chunk: &Value) -> StreamDelta {
        let Ok(chunk) = OpenAiChunk::deserialize(chunk) else {
            return StreamDelta::default();
        };
        let text = chunk
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta)
            .and_then(|d| d.content)
            .filter(|t| !t.is_empty());
        StreamDelta {
            text,
            model: chunk.model,
        }
    }

    fn assemble_stream(&self, model: Option<&str>, text: &str) -> Value {
        json!({
            "object": "chat.completion",
            "model": model.unwrap_or(UNKNOWN_MODEL),
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }]
        })
    }
}
