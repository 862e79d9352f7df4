use crate::builder::ResponseBuilder;
use crate::traits::{ContentBlockParser, StreamDelta, expect_object};
use crate::{Error, Result};
use finsight_types::*;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::schema::*;

/// Model name used when a Google response carries none
pub const UNKNOWN_MODEL: &str = "gemini-unknown";

/// Normalize a Gemini `generateContent` response.
///
/// Only `candidates[0]` is read. The candidate's `thinking_content` sits outside
/// `parts`, so its REASONING block is placed ahead of the parts; TEXT blocks keep
/// their relative order either way.
pub(crate) fn normalize_google_response(raw: &Value, retain_raw: bool) -> Result<ParsedResponse> {
    expect_object(raw)?;
    let mut normalized = raw.clone();
    drop_shadowed_aliases(&mut normalized);
    let response = GoogleResponse::deserialize(&normalized)?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(Error::Parse("response has no candidates".to_string()));
    };

    let model = response
        .model_version
        .or(response.model)
        .unwrap_or_else(|| UNKNOWN_MODEL.to_string());
    let mut thought_tokens = response
        .usage_metadata
        .as_ref()
        .and_then(|u| u.thoughts_token_count);

    let mut builder = ResponseBuilder::new(Provider::Google, model);

    if let Some(thinking) = candidate
        .thinking_content
        .and_then(|t| t.text)
        .filter(|t| !t.is_empty())
    {
        let raw_thinking = json!({ "thinking_content": { "text": thinking.clone() } });
        builder.push_reasoning(
            BlockType::Reasoning,
            ReasoningFormat::GeminiReasoning,
            &thinking,
            thought_tokens.take(),
            raw_thinking,
        );
    }

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    for (idx, part) in parts.into_iter().enumerate() {
        match Part::deserialize(&part) {
            Ok(parsed) => map_part(&mut builder, parsed, part, &mut thought_tokens),
            Err(err) => builder.push_malformed(&format!("parts[{}]", idx), part, err),
        }
    }

    let usage = response
        .usage_metadata
        .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
        .unwrap_or_default();

    Ok(builder.finish(
        candidate.finish_reason,
        usage,
        retain_raw.then(|| raw.clone()),
    ))
}

fn map_part(
    builder: &mut ResponseBuilder,
    part: Part,
    raw: Value,
    thought_tokens: &mut Option<u64>,
) {
    if let Some(text) = part.text {
        if part.thought {
            builder.push_reasoning(
                BlockType::Reasoning,
                ReasoningFormat::GeminiReasoning,
                &text,
                thought_tokens.take(),
                raw,
            );
        } else {
            builder.push_text(&text, raw);
        }
    } else if let Some(call) = part.function_call {
        builder.push_tool_call(&call.name, call.id, ToolArguments::from_value(call.args), raw);
    } else if let Some(response) = part.function_response {
        let call_id = response.id.unwrap_or_else(|| response.name.clone());
        builder.push_tool_result(
            ToolResultData {
                call_id,
                tool_name: Some(response.name),
                result: response.response,
                error: None,
                execution_time_ms: None,
            },
            raw,
        );
    } else if let Some(inline) = part.inline_data {
        let block_type = if inline.mime_type.starts_with("image/") {
            BlockType::Image
        } else {
            BlockType::Document
        };
        let mut content = Map::new();
        content.insert("mime_type".to_string(), Value::String(inline.mime_type));
        content.insert("data".to_string(), Value::String(inline.data));
        builder.push_structured(block_type, content, raw);
    } else {
        builder.push_unknown(raw);
    }
}

/// Google response parser implementation
pub struct GoogleParser {
    retain_raw: bool,
}

impl Default for GoogleParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleParser {
    pub fn new() -> Self {
        Self { retain_raw: true }
    }

    pub fn retain_raw(mut self, retain: bool) -> Self {
        self.retain_raw = retain;
        self
    }
}

impl ContentBlockParser for GoogleParser {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    fn unknown_model(&self) -> &str {
        UNKNOWN_MODEL
    }

    fn parse(&self, raw: &Value) -> Result<ParsedResponse> {
        normalize_google_response(raw, self.retain_raw)
    }

    fn model_hint(&self, raw: &Value) -> Option<String> {
        ["model_version", "modelVersion", "model"]
            .iter()
            .find_map(|key| raw.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    }

    fn stream_delta(&self, chunk: &Value) -> StreamDelta {
        let mut normalized = chunk.clone();
        drop_shadowed_aliases(&mut normalized);
        let Ok(chunk) = GoogleResponse::deserialize(&normalized) else {
            return StreamDelta::default();
        };
        let text = chunk
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| Part::deserialize(p).ok())
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .filter(|t| !t.is_empty());
        StreamDelta {
            text,
            model: chunk.model_version.or(chunk.model),
        }
    }

    fn assemble_stream(&self, model: Option<&str>, text: &str) -> Value {
        let parts = if text.is_empty() {
            json!([])
        } else {
            json!([{"text": text}])
        };
        json!({
            "model_version": model.unwrap_or(UNKNOWN_MODEL),
            "candidates": [{
                "content": {"role": "model", "parts": parts},
                "finish_reason": "STOP"
            }]
        })
    }
}
