use crate::analysis::InsightAnalyzer;
use crate::config::EngineConfig;
use crate::validation::ToolCallValidator;
use crate::{Error, Result};
use finsight_providers::{ContentBlockParser, ParserRegistry};
use finsight_types::{ProcessedFinancialResponse, Provider};
use serde_json::Value;
use std::sync::Arc;

/// Collects text fragments from streaming chunks, in arrival order.
///
/// Chunks that carry no text (pings, stop events) are skipped. The first model
/// name seen is kept.
pub struct StreamAccumulator {
    parser: Arc<dyn ContentBlockParser>,
    buffer: String,
    model: Option<String>,
    chunks: usize,
}

impl StreamAccumulator {
    pub fn new(parser: Arc<dyn ContentBlockParser>) -> Self {
        Self {
            parser,
            buffer: String::new(),
            model: None,
            chunks: 0,
        }
    }

    pub fn push(&mut self, chunk: &Value) {
        let delta = self.parser.stream_delta(chunk);
        if let Some(text) = delta.text {
            self.buffer.push_str(&text);
        }
        if self.model.is_none() {
            self.model = delta.model;
        }
        self.chunks += 1;
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Complete response in the provider's own shape
    pub fn finish(self) -> Value {
        tracing::debug!(
            provider = %self.parser.provider(),
            chunks = self.chunks,
            chars = self.buffer.len(),
            "assembled stream"
        );
        self.parser.assemble_stream(self.model.as_deref(), &self.buffer)
    }
}

/// Parser → analyzer → validator pipeline bound to one provider.
///
/// `process` never fails: parse problems surface in `parsed.parse_errors`, tool
/// problems in the validation results. Only construction can fail, when no
/// parser exists for the requested provider.
pub struct ResponseHandler {
    parser: Arc<dyn ContentBlockParser>,
    analyzer: InsightAnalyzer,
    validator: ToolCallValidator,
}

impl ResponseHandler {
    pub fn new(parser: Arc<dyn ContentBlockParser>) -> Self {
        Self {
            parser,
            analyzer: InsightAnalyzer::new(),
            validator: ToolCallValidator::default(),
        }
    }

    /// Handler for an explicitly named provider
    pub fn for_provider(provider: &Provider) -> Result<Self> {
        Ok(Self::new(ParserRegistry::with_builtin().get(provider)?))
    }

    /// Handler for the provider inferred from a model name (defaults to Anthropic)
    pub fn for_model(model: &str) -> Result<Self> {
        Ok(Self::new(ParserRegistry::with_builtin().for_model(model)?))
    }

    /// Handler built from config, using the built-in parsers
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::from_config_with(&ParserRegistry::with_builtin(), config)
    }

    /// Handler built from config, selecting the parser from `registry`
    pub fn from_config_with(registry: &ParserRegistry, config: &EngineConfig) -> Result<Self> {
        let parser = match (&config.provider, &config.model) {
            (Some(provider), _) => registry.get(&Provider::from(provider.clone()))?,
            (None, Some(model)) if config.strict_inference => registry.for_model_strict(model)?,
            (None, Some(model)) => registry.for_model(model)?,
            (None, None) => {
                return Err(Error::Config(
                    "neither a provider nor a model is configured".to_string(),
                ));
            }
        };
        Ok(Self::new(parser).with_validator(config.validator()))
    }

    pub fn with_validator(mut self, validator: ToolCallValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_analyzer(mut self, analyzer: InsightAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn provider(&self) -> Provider {
        self.parser.provider()
    }

    pub fn parser(&self) -> &Arc<dyn ContentBlockParser> {
        &self.parser
    }

    /// Run the full pipeline over one complete response
    pub fn process(&self, raw: &Value) -> ProcessedFinancialResponse {
        let parsed = self.parser.safe_parse(raw);
        let reasoning_insights = self.analyzer.analyze_reasoning(&parsed);
        let text_insights = self.analyzer.analyze_final_text(&parsed);
        let tool_validations = self.validator.validate_all(&parsed.tool_calls);

        let processed =
            ProcessedFinancialResponse::new(parsed, reasoning_insights, text_insights, tool_validations);
        tracing::debug!(
            provider = %processed.parsed.provider,
            model = %processed.parsed.model,
            insights = processed.all_insights.len(),
            tool_calls = processed.tool_validations.len(),
            tools_valid = processed.tools_valid(),
            "processed response"
        );
        processed
    }

    /// Accumulate streaming chunks in order, then process the assembled response
    pub fn process_stream<I>(&self, chunks: I) -> ProcessedFinancialResponse
    where
        I: IntoIterator<Item = Value>,
    {
        let mut accumulator = self.stream();
        for chunk in chunks {
            accumulator.push(&chunk);
        }
        self.process(&accumulator.finish())
    }

    /// Accumulator for callers that receive chunks one at a time
    pub fn stream(&self) -> StreamAccumulator {
        StreamAccumulator::new(Arc::clone(&self.parser))
    }
}
