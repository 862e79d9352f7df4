//! Keyword and regex insight extraction.
//!
//! Deterministic: text is split into sentences, each lower-cased sentence is
//! matched against an ordered keyword table, and matching sentences get their
//! numeric metrics extracted. Sentences that match nothing are dropped.

pub mod keywords;
pub mod metrics;

pub use keywords::{KEYWORD_TABLE, KeywordSet, classify};
pub use metrics::extract_metrics;

use finsight_types::{FinancialInsight, InsightSource, ParsedResponse};
use regex::Regex;
use std::sync::LazyLock;

/// Confidence attached to every keyword match
pub const INSIGHT_CONFIDENCE: f64 = 0.85;

// A period only ends a sentence when followed by whitespace or the end of
// the text, so "$150.50" stays whole.
static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(?:\s+|$)").unwrap());

/// Split text into trimmed, non-empty sentences.
///
/// Only a period followed by whitespace or the end of the text is a boundary,
/// so decimals like "grew 5.2%" and "$150.50" are not split the way a bare
/// split on every `.` would split them.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone)]
pub struct InsightAnalyzer {
    table: &'static [KeywordSet],
}

impl Default for InsightAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightAnalyzer {
    pub fn new() -> Self {
        Self {
            table: KEYWORD_TABLE,
        }
    }

    /// Use a different classification table (still first-match-wins)
    pub fn with_table(table: &'static [KeywordSet]) -> Self {
        Self { table }
    }

    /// Insights from one piece of text
    pub fn analyze_text(&self, text: &str, source: InsightSource) -> Vec<FinancialInsight> {
        split_sentences(text)
            .into_iter()
            .filter_map(|sentence| {
                let lowered = sentence.to_lowercase();
                let insight_type = classify(self.table, &lowered)?;
                Some(FinancialInsight {
                    insight_type,
                    content: sentence.to_string(),
                    confidence: INSIGHT_CONFIDENCE,
                    source,
                    metrics: extract_metrics(&lowered),
                })
            })
            .collect()
    }

    /// Insights from every reasoning trace, in trace order
    pub fn analyze_reasoning(&self, parsed: &ParsedResponse) -> Vec<FinancialInsight> {
        parsed
            .reasoning_traces
            .iter()
            .flat_map(|trace| self.analyze_text(&trace.content, InsightSource::Reasoning))
            .collect()
    }

    /// Insights from the assembled final text
    pub fn analyze_final_text(&self, parsed: &ParsedResponse) -> Vec<FinancialInsight> {
        self.analyze_text(&parsed.final_text, InsightSource::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_types::{InsightType, Provider, ReasoningFormat, ReasoningTrace};

    #[test]
    fn test_split_keeps_decimals() {
        assert_eq!(
            split_sentences("Shares hit $150.50 today. Volume was light.  "),
            vec!["Shares hit $150.50 today", "Volume was light"]
        );
        assert_eq!(split_sentences("  .  . "), Vec::<&str>::new());
        assert_eq!(split_sentences("No terminal period"), vec!["No terminal period"]);
        assert_eq!(
            split_sentences("Sales grew 5.2% on a 1.5x multiple. Done."),
            vec!["Sales grew 5.2% on a 1.5x multiple", "Done"]
        );
    }

    #[test]
    fn test_valuation_sentence_with_amount() {
        let insights = InsightAnalyzer::new().analyze_text(
            "The P/E ratio suggests a fair value of $150.",
            InsightSource::Text,
        );

        assert_eq!(insights.len(), 1);
        let insight = &insights[0];
        assert_eq!(insight.insight_type, InsightType::Valuation);
        assert_eq!(insight.content, "The P/E ratio suggests a fair value of $150");
        assert_eq!(insight.confidence, INSIGHT_CONFIDENCE);
        assert_eq!(insight.source, InsightSource::Text);
        assert_eq!(insight.metrics.unwrap().amount, Some(150.0));
    }

    #[test]
    fn test_unmatched_sentences_dropped() {
        let insights = InsightAnalyzer::new().analyze_text(
            "Hello there. The outlook is positive. Thanks.",
            InsightSource::Text,
        );

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].insight_type, InsightType::Forecast);
        assert!(insights[0].metrics.is_none());
    }

    #[test]
    fn test_reasoning_traces_in_order() {
        let mut parsed = ParsedResponse::failed(Provider::Anthropic, "claude-3", "unused");
        parsed.reasoning_traces = vec![
            ReasoningTrace::new(ReasoningFormat::ClaudeThinking, "Debt is rising."),
            ReasoningTrace::new(ReasoningFormat::ClaudeThinking, "Margins expanded 3%."),
        ];
        parsed.final_text = "Unusual options activity.".to_string();

        let analyzer = InsightAnalyzer::new();
        let reasoning = analyzer.analyze_reasoning(&parsed);
        let types: Vec<InsightType> = reasoning.iter().map(|i| i.insight_type).collect();
        assert_eq!(types, vec![InsightType::Risk, InsightType::Performance]);
        assert!(reasoning.iter().all(|i| i.source == InsightSource::Reasoning));
        assert_eq!(reasoning[1].metrics.unwrap().percentage, Some(3.0));

        let text = analyzer.analyze_final_text(&parsed);
        assert_eq!(text[0].insight_type, InsightType::Anomaly);
    }

    #[test]
    fn test_custom_table() {
        static TABLE: &[KeywordSet] = &[KeywordSet {
            insight_type: InsightType::Risk,
            keywords: &["tariff"],
        }];
        let insights = InsightAnalyzer::with_table(TABLE)
            .analyze_text("Tariffs loom. Revenue grew.", InsightSource::Text);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].content, "Tariffs loom");
    }
}
