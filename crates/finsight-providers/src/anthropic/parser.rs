use crate::Result;
use crate::builder::ResponseBuilder;
use crate::traits::{ContentBlockParser, StreamDelta, expect_object};
use finsight_types::*;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::schema::*;

/// Model name used when an Anthropic response carries none
pub const UNKNOWN_MODEL: &str = "claude-unknown";

/// Normalize an Anthropic Messages API response.
///
/// Content is a flat `content[]` sequence with a `type` discriminator per block;
/// the block order is preserved as-is.
pub(crate) fn normalize_anthropic_response(raw: &Value, retain_raw: bool) -> Result<ParsedResponse> {
    expect_object(raw)?;
    let response = AnthropicResponse::deserialize(raw)?;

    let model = response
        .model
        .unwrap_or_else(|| UNKNOWN_MODEL.to_string());
    let mut builder = ResponseBuilder::new(Provider::Anthropic, model);

    for (idx, block) in response.content.into_iter().enumerate() {
        if block.get("type").and_then(Value::as_str).is_none() {
            builder.push_unknown(block);
            continue;
        }

        match AnthropicContent::deserialize(&block) {
            Ok(content) => map_content(&mut builder, content, block),
            Err(err) => builder.push_malformed(&format!("content[{}]", idx), block, err),
        }
    }

    let usage = response
        .usage
        .map(|u| TokenUsage::new(u.input_tokens, u.output_tokens))
        .unwrap_or_default();

    Ok(builder.finish(
        response.stop_reason,
        usage,
        retain_raw.then(|| raw.clone()),
    ))
}

fn map_content(builder: &mut ResponseBuilder, content: AnthropicContent, raw: Value) {
    match content {
        AnthropicContent::Text { text } => builder.push_text(&text, raw),

        AnthropicContent::Thinking { thinking } => builder.push_reasoning(
            BlockType::Thinking,
            ReasoningFormat::ClaudeThinking,
            &thinking,
            None,
            raw,
        ),

        AnthropicContent::RedactedThinking { data } => {
            // Encrypted reasoning: no readable trace
            let mut content = Map::new();
            content.insert("redacted".to_string(), Value::Bool(true));
            content.insert("data".to_string(), Value::String(data));
            builder.push_structured(BlockType::Thinking, content, raw);
        }

        AnthropicContent::ToolUse { id, name, input } => {
            builder.push_tool_call(&name, id, ToolArguments::from_value(input), raw)
        }

        AnthropicContent::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => {
            let result = content.unwrap_or(Value::Null);
            let error = is_error.then(|| match &result {
                Value::String(s) => s.clone(),
                _ => "tool reported an error".to_string(),
            });
            builder.push_tool_result(
                ToolResultData {
                    call_id: tool_use_id,
                    tool_name: None,
                    result,
                    error,
                    execution_time_ms: None,
                },
                raw,
            );
        }

        AnthropicContent::Image { source } => {
            builder.push_structured(BlockType::Image, media_content(source), raw)
        }

        AnthropicContent::Document { source, title } => {
            let mut content = media_content(source);
            if let Some(title) = title {
                content.insert("title".to_string(), Value::String(title));
            }
            builder.push_structured(BlockType::Document, content, raw);
        }

        AnthropicContent::Unknown => builder.push_unknown(raw),
    }
}

fn media_content(source: MediaSource) -> Map<String, Value> {
    let mut content = Map::new();
    let fields = [
        ("source_type", source.source_type),
        ("media_type", source.media_type),
        ("data", source.data),
        ("url", source.url),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            content.insert(key.to_string(), Value::String(value));
        }
    }
    content
}

/// Anthropic response parser implementation
pub struct AnthropicParser {
    retain_raw: bool,
}

impl Default for AnthropicParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AnthropicParser {
    pub fn new() -> Self {
        Self { retain_raw: true }
    }

    /// Control whether the full raw response is copied into `raw_response`
    pub fn retain_raw(mut self, retain: bool) -> Self {
        self.retain_raw = retain;
        self
    }
}

impl ContentBlockParser for AnthropicParser {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    fn unknown_model(&self) -> &str {
        UNKNOWN_MODEL
    }

    fn parse(&self, raw: &Value) -> Result<ParsedResponse> {
        normalize_anthropic_response(raw, self.retain_raw)
    }

    fn stream_delta(&self, chunk: &Value) -> StreamDelta {
        match AnthropicStreamEvent::deserialize(chunk) {
            Ok(AnthropicStreamEvent::MessageStart { message }) => StreamDelta {
                text: None,
                model: message.model,
            },
            Ok(AnthropicStreamEvent::ContentBlockStart { content_block }) => StreamDelta {
                text: content_block
                    .get("text")
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
                model: None,
            },
            Ok(AnthropicStreamEvent::ContentBlockDelta {
                delta: AnthropicDelta::TextDelta { text },
            }) => StreamDelta {
                text: Some(text),
                model: None,
            },
            _ => StreamDelta::default(),
        }
    }

    fn assemble_stream(&self, model: Option<&str>, text: &str) -> Value {
        let content = if text.is_empty() {
            json!([])
        } else {
            json!([{"type": "text", "text": text}])
        };
        json!({
            "type": "message",
            "role": "assistant",
            "model": model.unwrap_or(UNKNOWN_MODEL),
            "content": content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: Value) -> ParsedResponse {
        AnthropicParser::new().safe_parse(&raw)
    }

    #[test]
    fn test_thinking_then_text() {
        let response = parse(json!({
            "model": "claude-3-7-sonnet-20250219",
            "content": [
                {"type": "thinking", "thinking": "Margins are expanding.", "signature": "abc"},
                {"type": "text", "text": "Buy."}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 120, "output_tokens": 40}
        }));

        assert!(response.is_success());
        assert_eq!(response.content_blocks.len(), 2);
        assert_eq!(response.content_blocks[0].block_type, BlockType::Thinking);
        assert_eq!(response.reasoning_traces.len(), 1);
        assert_eq!(
            response.reasoning_traces[0].format,
            ReasoningFormat::ClaudeThinking
        );
        assert_eq!(response.final_text, "Buy.");
        assert_eq!(response.usage, TokenUsage::new(120, 40));
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
    }

    #[test]
    fn test_tool_use_and_result() {
        let response = parse(json!({
            "model": "claude-3-5-sonnet-20241022",
            "content": [
                {"type": "tool_use", "id": "toolu_01", "name": "get_stock_price", "input": {"ticker": "AAPL"}},
                {"type": "tool_result", "tool_use_id": "toolu_01", "content": "timeout", "is_error": true}
            ],
            "stop_reason": "tool_use"
        }));

        assert_eq!(response.tool_calls.len(), 1);
        let call = &response.tool_calls[0];
        assert_eq!(call.tool_name, "get_stock_price");
        assert_eq!(call.call_id.as_deref(), Some("toolu_01"));
        assert_eq!(call.input("ticker"), Some(&json!("AAPL")));
        assert_eq!(call.provider, Provider::Anthropic);

        assert_eq!(response.tool_results.len(), 1);
        assert_eq!(response.tool_results[0].error.as_deref(), Some("timeout"));
        assert_eq!(response.content_blocks[1].block_type, BlockType::ToolResult);
        assert_eq!(response.final_text, "");
    }

    #[test]
    fn test_image_redacted_and_document_blocks() {
        let response = parse(json!({
            "model": "claude-3-opus-20240229",
            "content": [
                {"type": "image", "source": {"type": "base64", "media_type": "image/png", "data": "iVBOR"}},
                {"type": "redacted_thinking", "data": "EqQBCg"},
                {"type": "document", "source": {"type": "url", "url": "https://example.com/10k.pdf"}, "title": "10-K"}
            ]
        }));

        let image = response.content_blocks[0].content.as_map().unwrap();
        assert_eq!(image["media_type"], "image/png");
        assert_eq!(image["data"], "iVBOR");

        assert_eq!(response.content_blocks[1].block_type, BlockType::Thinking);
        assert!(response.reasoning_traces.is_empty());

        let document = response.content_blocks[2].content.as_map().unwrap();
        assert_eq!(response.content_blocks[2].block_type, BlockType::Document);
        assert_eq!(document["title"], "10-K");
    }

    #[test]
    fn test_unrecognized_block_is_kept_without_error() {
        let citation = json!({"type": "server_tool_use", "id": "srv_1", "name": "web_search"});
        let response = parse(json!({
            "model": "claude-3-5-haiku-20241022",
            "content": [citation.clone(), {"type": "text", "text": "Done."}]
        }));

        assert!(response.is_success());
        assert!(response.content_blocks[0].is_unknown());
        assert_eq!(response.content_blocks[0].raw_provider_data, Some(citation));
        assert_eq!(response.final_text, "Done.");
    }

    #[test]
    fn test_malformed_block_does_not_abort() {
        let response = parse(json!({
            "model": "claude-3-5-haiku-20241022",
            "content": [
                {"type": "tool_use", "id": "toolu_02", "input": {"ticker": "AAPL"}},
                {"type": "text", "text": "Still here."}
            ]
        }));

        assert_eq!(response.parse_errors.len(), 1);
        assert!(response.parse_errors[0].starts_with("content[0]"));
        assert!(response.content_blocks[0].is_unknown());
        assert!(response.content_blocks[0].error.is_some());
        assert_eq!(response.final_text, "Still here.");
    }

    #[test]
    fn test_tool_use_without_id_is_kept() {
        let response = parse(json!({
            "model": "claude-3-5-sonnet-20241022",
            "content": [
                {"type": "tool_use", "name": "get_stock_price", "input": {"ticker": "AAPL"}}
            ]
        }));

        assert!(response.is_success());
        assert_eq!(response.tool_calls.len(), 1);
        let call = &response.tool_calls[0];
        assert_eq!(call.tool_name, "get_stock_price");
        assert_eq!(call.call_id, None);
        assert_eq!(call.input("ticker"), Some(&json!("AAPL")));
        assert_eq!(response.content_blocks[0].block_type, BlockType::ToolUse);
        assert!(response.content_blocks[0].content.as_map().unwrap().get("id").is_none());
    }

    #[test]
    fn test_empty_object_yields_sentinel() {
        let response = parse(json!({}));

        assert_eq!(response.model, UNKNOWN_MODEL);
        assert!(!response.parse_errors.is_empty());
        assert!(response.content_blocks.is_empty());
    }

    #[test]
    fn test_failed_parse_keeps_model_hint() {
        let response = parse(json!({"model": "claude-3-opus-20240229", "content": "oops"}));

        assert_eq!(response.model, "claude-3-opus-20240229");
        assert!(!response.is_success());
    }

    #[test]
    fn test_stream_delta_reads_text_and_model() {
        let parser = AnthropicParser::new();

        let start = parser.stream_delta(&json!({
            "type": "message_start",
            "message": {"id": "msg_1", "model": "claude-3-5-sonnet-20241022", "content": []}
        }));
        assert_eq!(start.model.as_deref(), Some("claude-3-5-sonnet-20241022"));

        let delta = parser.stream_delta(&json!({
            "type": "content_block_delta",
            "index": 0,
            "delta": {"type": "text_delta", "text": "Hello"}
        }));
        assert_eq!(delta.text.as_deref(), Some("Hello"));

        let ping = parser.stream_delta(&json!({"type": "ping"}));
        assert!(ping.is_empty());
    }
}
