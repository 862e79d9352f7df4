use crate::Result;
use finsight_types::{ParsedResponse, Provider};
use serde_json::Value;

/// Response normalization for one provider shape
///
/// Responsibilities:
/// - Locate content inside the provider's response structure
/// - Map each provider block to unified blocks, traces, tool calls and results
/// - Extract model, stop reason and token usage
/// - Read and reassemble incremental stream chunks
pub trait ContentBlockParser: Send + Sync {
    /// Provider this parser understands
    fn provider(&self) -> Provider;

    /// Model name reported when the response carries none
    fn unknown_model(&self) -> &str;

    /// Parse a full response; fails only when the top-level shape is unusable.
    /// Individual malformed blocks never fail the parse.
    fn parse(&self, raw: &Value) -> Result<ParsedResponse>;

    /// Extract the incremental text and model from one streaming chunk
    fn stream_delta(&self, chunk: &Value) -> StreamDelta;

    /// Build a complete response in this provider's shape from accumulated stream text
    fn assemble_stream(&self, model: Option<&str>, text: &str) -> Value;

    /// Best-effort model lookup on a response that may not parse
    fn model_hint(&self, raw: &Value) -> Option<String> {
        raw.get("model").and_then(|v| v.as_str()).map(str::to_string)
    }

    /// Parse without failing: any error is logged and reported in `parse_errors`
    fn safe_parse(&self, raw: &Value) -> ParsedResponse {
        match self.parse(raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                let model = self
                    .model_hint(raw)
                    .unwrap_or_else(|| self.unknown_model().to_string());
                tracing::warn!(
                    provider = %self.provider(),
                    model = %model,
                    error = %err,
                    "response could not be parsed, returning empty result"
                );
                ParsedResponse::failed(self.provider(), model, err.to_string())
            }
        }
    }
}

/// Text and model carried by one streaming chunk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamDelta {
    pub text: Option<String>,
    pub model: Option<String>,
}

impl StreamDelta {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.model.is_none()
    }
}

/// Reject non-object responses before deserializing the provider schema
pub(crate) fn expect_object(raw: &Value) -> Result<()> {
    if raw.is_object() {
        Ok(())
    } else {
        Err(crate::Error::Parse(format!(
            "expected a JSON object response, got {}",
            value_kind(raw)
        )))
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
