use serde::{Deserialize, Serialize};

use crate::response::ParsedResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Valuation,
    Risk,
    Performance,
    Forecast,
    Anomaly,
    Unknown,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Valuation => "valuation",
            InsightType::Risk => "risk",
            InsightType::Performance => "performance",
            InsightType::Forecast => "forecast",
            InsightType::Anomaly => "anomaly",
            InsightType::Unknown => "unknown",
        }
    }
}

/// Which part of the response an insight was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    Reasoning,
    Text,
}

/// Numbers pulled out of an insight sentence, at most one per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
}

impl InsightMetrics {
    pub fn is_empty(&self) -> bool {
        self.percentage.is_none() && self.amount.is_none() && self.ratio.is_none()
    }
}

/// A keyword-classified observation taken from reasoning or answer text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialInsight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub content: String,
    pub confidence: f64,
    pub source: InsightSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<InsightMetrics>,
}

/// Verdict for one tool call. `errors` is empty exactly when `is_valid` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolValidationResult {
    pub is_valid: bool,
    pub tool_name: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub estimated_cost: f64,
}

impl ToolValidationResult {
    pub fn new(
        tool_name: impl Into<String>,
        errors: Vec<String>,
        warnings: Vec<String>,
        estimated_cost: f64,
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            tool_name: tool_name.into(),
            errors,
            warnings,
            estimated_cost,
        }
    }
}

/// Parsed response together with everything derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedFinancialResponse {
    pub parsed: ParsedResponse,
    pub reasoning_insights: Vec<FinancialInsight>,
    pub text_insights: Vec<FinancialInsight>,
    pub all_insights: Vec<FinancialInsight>,
    pub tool_validations: Vec<ToolValidationResult>,
}

impl ProcessedFinancialResponse {
    pub fn new(
        parsed: ParsedResponse,
        reasoning_insights: Vec<FinancialInsight>,
        text_insights: Vec<FinancialInsight>,
        tool_validations: Vec<ToolValidationResult>,
    ) -> Self {
        let all_insights = reasoning_insights
            .iter()
            .chain(text_insights.iter())
            .cloned()
            .collect();
        Self {
            parsed,
            reasoning_insights,
            text_insights,
            all_insights,
            tool_validations,
        }
    }

    /// True when every tool call passed validation (vacuously true with no calls)
    pub fn tools_valid(&self) -> bool {
        self.tool_validations.iter().all(|v| v.is_valid)
    }

    pub fn total_tool_cost(&self) -> f64 {
        self.tool_validations.iter().map(|v| v.estimated_cost).sum()
    }
}
