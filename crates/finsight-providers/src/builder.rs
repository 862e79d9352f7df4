use finsight_types::*;
use serde_json::{Map, Value};

/// ResponseBuilder collects normalized pieces while a parser walks a response
/// and assembles the final `ParsedResponse` in one place.
///
/// Every block it creates is tagged with the builder's provider and keeps its
/// source fragment in `raw_provider_data`.
pub struct ResponseBuilder {
    provider: Provider,
    model: String,
    blocks: Vec<UnifiedContentBlock>,
    traces: Vec<ReasoningTrace>,
    tool_calls: Vec<ToolCallData>,
    tool_results: Vec<ToolResultData>,
    errors: Vec<String>,
}

impl ResponseBuilder {
    pub fn new(provider: Provider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            blocks: Vec::new(),
            traces: Vec::new(),
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn push_block(&mut self, block: UnifiedContentBlock) {
        self.blocks.push(block.with_provider(self.provider.clone()));
    }

    pub fn push_text(&mut self, text: &str, raw: Value) {
        self.push_block(UnifiedContentBlock::text(text).with_raw(raw));
    }

    /// Reasoning output: a REASONING/THINKING block plus a matching trace
    pub fn push_reasoning(
        &mut self,
        block_type: BlockType,
        format: ReasoningFormat,
        text: &str,
        token_count: Option<u64>,
        raw: Value,
    ) {
        self.push_block(
            UnifiedContentBlock::with_text(block_type, text)
                .with_reasoning_format(format)
                .with_raw(raw),
        );
        self.traces
            .push(ReasoningTrace::new(format, text).with_token_count(token_count));
    }

    /// Block without a trace (e.g. redacted thinking, images, documents)
    pub fn push_structured(&mut self, block_type: BlockType, content: Map<String, Value>, raw: Value) {
        self.push_block(UnifiedContentBlock::structured(block_type, content).with_raw(raw));
    }

    pub fn push_tool_call(
        &mut self,
        name: &str,
        call_id: Option<String>,
        arguments: ToolArguments,
        raw: Value,
    ) {
        if arguments.is_raw() {
            tracing::debug!(
                provider = %self.provider,
                tool = name,
                "tool arguments are not a JSON object, keeping raw string"
            );
        }
        let call = ToolCallData::new(name, call_id, arguments, self.provider.clone());

        let mut content = Map::new();
        if let Some(id) = &call.call_id {
            content.insert("id".to_string(), Value::String(id.clone()));
        }
        content.insert("name".to_string(), Value::String(call.tool_name.clone()));
        content.insert("input".to_string(), Value::Object(call.raw_input.clone()));

        self.push_structured(BlockType::ToolUse, content, raw);
        self.tool_calls.push(call);
    }

    pub fn push_tool_result(&mut self, result: ToolResultData, raw: Value) {
        let mut content = Map::new();
        content.insert("call_id".to_string(), Value::String(result.call_id.clone()));
        if let Some(name) = &result.tool_name {
            content.insert("name".to_string(), Value::String(name.clone()));
        }
        content.insert("result".to_string(), result.result.clone());
        content.insert("is_error".to_string(), Value::Bool(result.is_error()));

        self.push_structured(BlockType::ToolResult, content, raw);
        self.tool_results.push(result);
    }

    /// Fragment with an unrecognized discriminator: kept verbatim, not an error
    pub fn push_unknown(&mut self, raw: Value) {
        self.push_block(UnifiedContentBlock::unknown(raw, None));
    }

    /// Fragment whose discriminator is known but whose fields did not match.
    /// Kept verbatim with an error note that is also recorded on the response.
    pub fn push_malformed(&mut self, location: &str, raw: Value, error: impl std::fmt::Display) {
        let message = format!("{}: {}", location, error);
        tracing::warn!(provider = %self.provider, %message, "malformed block downgraded to unknown");
        self.push_block(UnifiedContentBlock::unknown(raw, Some(message.clone())));
        self.errors.push(message);
    }

    pub fn finish(
        self,
        stop_reason: Option<String>,
        usage: TokenUsage,
        raw_response: Option<Value>,
    ) -> ParsedResponse {
        let final_text = assemble_final_text(&self.blocks);
        let reasoning_traces = self
            .traces
            .into_iter()
            .map(|mut trace| {
                if trace.stop_reason.is_none() {
                    trace.stop_reason = stop_reason.clone();
                }
                trace
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            provider = %self.provider,
            model = %self.model,
            blocks = self.blocks.len(),
            traces = reasoning_traces.len(),
            tool_calls = self.tool_calls.len(),
            errors = self.errors.len(),
            "parsed response"
        );

        ParsedResponse {
            provider: self.provider,
            model: self.model,
            content_blocks: self.blocks,
            reasoning_traces,
            tool_calls: self.tool_calls,
            tool_results: self.tool_results,
            final_text,
            stop_reason,
            usage,
            raw_response,
            parse_errors: self.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_tags_blocks_and_assembles_text() {
        let mut builder = ResponseBuilder::new(Provider::OpenAi, "gpt-4o");
        builder.push_text("First.", json!("First."));
        builder.push_tool_call(
            "get_stock_price",
            Some("call_1".to_string()),
            ToolArguments::decode(r#"{"ticker": "MSFT"}"#),
            json!({}),
        );
        builder.push_text("Second.", json!("Second."));

        let response = builder.finish(Some("stop".to_string()), TokenUsage::new(3, 4), None);

        assert_eq!(response.final_text, "First.\nSecond.");
        assert_eq!(response.content_blocks.len(), 3);
        assert!(response.content_blocks.iter().all(|b| {
            b.metadata.as_ref().and_then(|m| m.provider.clone()) == Some(Provider::OpenAi)
        }));

        let tool_block = response.content_blocks[1].content.as_map().unwrap();
        assert_eq!(tool_block["name"], "get_stock_price");
        assert_eq!(tool_block["id"], "call_1");
        assert_eq!(tool_block["input"], json!({"ticker": "MSFT"}));
        assert!(response.is_success());
    }

    #[test]
    fn test_malformed_block_records_error() {
        let mut builder = ResponseBuilder::new(Provider::Anthropic, "claude-3-opus");
        let raw = json!({"type": "text"});
        builder.push_malformed("content[0]", raw.clone(), "missing field `text`");

        let response = builder.finish(None, TokenUsage::default(), None);

        assert_eq!(response.parse_errors, vec!["content[0]: missing field `text`"]);
        let block = &response.content_blocks[0];
        assert!(block.is_unknown());
        assert_eq!(block.raw_provider_data, Some(raw));
        assert_eq!(block.error.as_deref(), Some("content[0]: missing field `text`"));
    }

    #[test]
    fn test_traces_inherit_stop_reason() {
        let mut builder = ResponseBuilder::new(Provider::Anthropic, "claude-3-opus");
        builder.push_reasoning(
            BlockType::Thinking,
            ReasoningFormat::ClaudeThinking,
            "Check margins first",
            None,
            json!({}),
        );

        let response = builder.finish(Some("end_turn".to_string()), TokenUsage::default(), None);
        assert_eq!(response.reasoning_traces[0].stop_reason.as_deref(), Some("end_turn"));
    }
}
