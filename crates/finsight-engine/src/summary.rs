use finsight_types::{InsightMetrics, InsightSource, InsightType, ProcessedFinancialResponse};
use serde::{Deserialize, Serialize};

/// Flat view of a processed response for UIs and log pipelines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub model: String,
    pub insights: Vec<InsightSummary>,
    pub reasoning_available: bool,
    pub tools_valid: bool,
    pub total_tool_cost: f64,
    pub tokens: TokenSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub content: String,
    pub confidence: f64,
    pub source: InsightSource,
    /// Empty object when no metric was found
    pub metrics: InsightMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSummary {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

pub fn summarize(processed: &ProcessedFinancialResponse) -> ResponseSummary {
    let parsed = &processed.parsed;
    ResponseSummary {
        model: parsed.model.clone(),
        insights: processed
            .all_insights
            .iter()
            .map(|insight| InsightSummary {
                insight_type: insight.insight_type,
                content: insight.content.clone(),
                confidence: insight.confidence,
                source: insight.source,
                metrics: insight.metrics.unwrap_or_default(),
            })
            .collect(),
        reasoning_available: parsed.has_reasoning(),
        tools_valid: processed.tools_valid(),
        total_tool_cost: processed.total_tool_cost(),
        tokens: TokenSummary {
            input: parsed.usage.input_tokens,
            output: parsed.usage.output_tokens,
            total: parsed.usage.total(),
        },
    }
}

impl From<&ProcessedFinancialResponse> for ResponseSummary {
    fn from(processed: &ProcessedFinancialResponse) -> Self {
        summarize(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResponseHandler;
    use finsight_types::Provider;
    use serde_json::json;

    #[test]
    fn test_summary_shape() {
        let handler = ResponseHandler::for_provider(&Provider::OpenAi).unwrap();
        let processed = handler.process(&json!({
            "model": "gpt-4o",
            "choices": [{"message": {
                "content": "Leverage is a concern. See you.",
                "tool_calls": [{"id": "c1", "function": {"name": "search_news", "arguments": "{\"query\": \"debt\"}"}}]
            }}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5}
        }));

        let summary = summarize(&processed);
        assert_eq!(summary.model, "gpt-4o");
        assert!(!summary.reasoning_available);
        assert!(summary.tools_valid);
        assert_eq!(summary.total_tool_cost, 0.001);
        assert_eq!(
            summary.tokens,
            TokenSummary {
                input: 10,
                output: 5,
                total: 15
            }
        );

        let value = serde_json::to_value(&summary).unwrap();
        let insight = &value["insights"][0];
        assert_eq!(insight["type"], "risk");
        assert_eq!(insight["source"], "text");
        assert_eq!(insight["content"], "Leverage is a concern");
        assert_eq!(insight["metrics"], json!({}));
    }

    #[test]
    fn test_oversized_usage_counts() {
        let handler = ResponseHandler::for_provider(&Provider::Anthropic).unwrap();
        let processed = handler.process(&json!({
            "model": "claude-3-opus",
            "content": [{"type": "text", "text": "Hold."}],
            "usage": {"input_tokens": u64::MAX, "output_tokens": 1}
        }));

        let summary = summarize(&processed);
        assert_eq!(summary.tokens.input, u64::MAX);
        assert_eq!(summary.tokens.output, 1);
        assert_eq!(summary.tokens.total, u64::MAX);
    }
}
