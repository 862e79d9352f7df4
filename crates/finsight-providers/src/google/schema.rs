use serde::Deserialize;
use serde_json::{Map, Value};

// SDK clients hand over snake_case keys, the REST API camelCase.
// Both spellings are accepted. A response carrying both spellings of one key
// would be a duplicate field for serde, so `drop_shadowed_aliases` removes the
// camelCase copy first.

const RESPONSE_ALIASES: &[(&str, &str)] = &[
    ("usage_metadata", "usageMetadata"),
    ("model_version", "modelVersion"),
];
const CANDIDATE_ALIASES: &[(&str, &str)] = &[
    ("finish_reason", "finishReason"),
    ("thinking_content", "thinkingContent"),
];
const USAGE_ALIASES: &[(&str, &str)] = &[
    ("prompt_token_count", "promptTokenCount"),
    ("candidates_token_count", "candidatesTokenCount"),
    ("thoughts_token_count", "thoughtsTokenCount"),
];
const PART_ALIASES: &[(&str, &str)] = &[
    ("function_call", "functionCall"),
    ("function_response", "functionResponse"),
    ("inline_data", "inlineData"),
];
const INLINE_DATA_ALIASES: &[(&str, &str)] = &[("mime_type", "mimeType")];

/// Remove camelCase keys whose snake_case twin is also present.
///
/// Walks only the response structure; tool arguments and tool responses are
/// left untouched.
pub(crate) fn drop_shadowed_aliases(raw: &mut Value) {
    let Some(response) = raw.as_object_mut() else {
        return;
    };
    drop_aliases(response, RESPONSE_ALIASES);

    if let Some(Value::Object(usage)) = field_mut(response, "usage_metadata", "usageMetadata") {
        drop_aliases(usage, USAGE_ALIASES);
    }

    let Some(Value::Array(candidates)) = response.get_mut("candidates") else {
        return;
    };
    for candidate in candidates.iter_mut().filter_map(Value::as_object_mut) {
        drop_aliases(candidate, CANDIDATE_ALIASES);

        let Some(Value::Array(parts)) = candidate
            .get_mut("content")
            .and_then(|c| c.get_mut("parts"))
        else {
            continue;
        };
        for part in parts.iter_mut().filter_map(Value::as_object_mut) {
            drop_aliases(part, PART_ALIASES);
            if let Some(Value::Object(inline)) = field_mut(part, "inline_data", "inlineData") {
                drop_aliases(inline, INLINE_DATA_ALIASES);
            }
        }
    }
}

fn drop_aliases(map: &mut Map<String, Value>, aliases: &[(&str, &str)]) {
    for (canonical, alias) in aliases {
        if map.contains_key(*canonical) {
            map.remove(*alias);
        }
    }
}

fn field_mut<'a>(
    map: &'a mut Map<String, Value>,
    canonical: &str,
    alias: &str,
) -> Option<&'a mut Value> {
    if map.contains_key(canonical) {
        map.get_mut(canonical)
    } else {
        map.get_mut(alias)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct GoogleResponse {
    pub candidates: Vec<Candidate>,
    #[serde(default, alias = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(default, alias = "modelVersion")]
    pub model_version: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default, alias = "finishReason")]
    pub finish_reason: Option<String>,
    /// Reasoning lives beside `content`, not inside `parts`
    #[serde(default, alias = "thinkingContent")]
    pub thinking_content: Option<ThinkingContent>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct CandidateContent {
    /// Parts stay raw so each one can fail on its own
    #[serde(default)]
    pub parts: Vec<Value>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ThinkingContent {
    #[serde(default)]
    pub text: Option<String>,
}

/// A content part carries exactly one payload field
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Part {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub thought: bool,
    #[serde(default, alias = "functionCall")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, alias = "functionResponse")]
    pub function_response: Option<FunctionResponse>,
    #[serde(default, alias = "inlineData")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct FunctionCall {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct FunctionResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub response: Value,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct InlineData {
    #[serde(alias = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct UsageMetadata {
    #[serde(default, alias = "promptTokenCount")]
    pub prompt_token_count: u64,
    #[serde(default, alias = "candidatesTokenCount")]
    pub candidates_token_count: u64,
    #[serde(default, alias = "thoughtsTokenCount")]
    pub thoughts_token_count: Option<u64>,
}
