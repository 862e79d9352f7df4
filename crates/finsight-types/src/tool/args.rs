use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool-call arguments after the provider's encoding has been undone.
///
/// Anthropic and Google hand over structured maps; OpenAI embeds the map as a
/// JSON string. Decoding that string is fallible, so the outcome is explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolArguments {
    Decoded(Map<String, Value>),
    Raw(String),
}

impl ToolArguments {
    /// Decode a JSON-encoded argument string.
    ///
    /// Blank strings decode to an empty map. Anything that is not a JSON object
    /// (invalid JSON, arrays, scalars) stays `Raw`.
    pub fn decode(encoded: &str) -> Self {
        if encoded.trim().is_empty() {
            return ToolArguments::Decoded(Map::new());
        }
        match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Object(map)) => ToolArguments::Decoded(map),
            _ => ToolArguments::Raw(encoded.to_string()),
        }
    }

    /// Wrap an already-structured value; non-objects are kept as their JSON text
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => ToolArguments::Decoded(map),
            Value::Null => ToolArguments::Decoded(Map::new()),
            Value::String(s) => ToolArguments::decode(&s),
            other => ToolArguments::Raw(other.to_string()),
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, ToolArguments::Raw(_))
    }

    /// Normalized input map: decoded maps as-is, raw strings as `{"raw": ...}`
    pub fn into_input(self) -> Map<String, Value> {
        match self {
            ToolArguments::Decoded(map) => map,
            ToolArguments::Raw(raw) => {
                let mut map = Map::new();
                map.insert("raw".to_string(), Value::String(raw));
                map
            }
        }
    }
}
