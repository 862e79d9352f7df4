use finsight_types::{ToolCallData, ToolValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Cost charged for a call when the tool has no cost of its own
pub const DEFAULT_TOOL_COST: f64 = 0.001;

/// Capability entry for one callable tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    /// Keys that must be present in the call input
    #[serde(default)]
    pub required: Vec<String>,
    /// Keys that must hold strings when present
    #[serde(default)]
    pub strings: Vec<String>,
    /// Keys that must hold numbers when present
    #[serde(default)]
    pub numbers: Vec<String>,
    /// Per-call cost in USD; the validator's default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: Vec::new(),
            strings: Vec::new(),
            numbers: Vec::new(),
            cost_usd: None,
        }
    }

    pub fn required(mut self, keys: &[&str]) -> Self {
        self.required.extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub fn strings(mut self, keys: &[&str]) -> Self {
        self.strings.extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub fn numbers(mut self, keys: &[&str]) -> Self {
        self.numbers.extend(keys.iter().map(|k| k.to_string()));
        self
    }

    pub fn cost(mut self, cost_usd: f64) -> Self {
        self.cost_usd = Some(cost_usd);
        self
    }

    fn check(&self, call: &ToolCallData, errors: &mut Vec<String>) {
        for key in &self.required {
            if !call.raw_input.contains_key(key) {
                errors.push(format!("Missing required parameter: {}", key));
            }
        }
        for key in &self.strings {
            if let Some(value) = call.raw_input.get(key)
                && !value.is_string()
            {
                errors.push(format!(
                    "Parameter '{}' must be a string, got {}",
                    key,
                    kind(value)
                ));
            }
        }
        for key in &self.numbers {
            if let Some(value) = call.raw_input.get(key)
                && !value.is_number()
            {
                errors.push(format!(
                    "Parameter '{}' must be a number, got {}",
                    key,
                    kind(value)
                ));
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Known tools keyed by name
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolSpec>,
}

impl ToolRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The market-data and analysis tools offered to the agent
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(
            ToolSpec::new("get_stock_price")
                .required(&["ticker"])
                .strings(&["ticker"])
                .cost(0.001),
        );
        registry.register(
            ToolSpec::new("get_financial_statements")
                .required(&["ticker", "statement_type"])
                .strings(&["ticker", "statement_type"])
                .numbers(&["periods"])
                .cost(0.002),
        );
        registry.register(
            ToolSpec::new("calculate_valuation")
                .required(&["ticker", "method"])
                .strings(&["ticker", "method"])
                .cost(0.0005),
        );
        registry.register(
            ToolSpec::new("search_news")
                .required(&["query"])
                .strings(&["query"])
                .numbers(&["limit"])
                .cost(0.001),
        );
        registry
    }

    /// Add a tool, replacing any existing entry with the same name
    pub fn register(&mut self, spec: ToolSpec) {
        self.tools.insert(spec.name.clone(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.tools.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Checks tool calls against the registry and an optional spending budget.
///
/// Holds configuration only; the running total of a budget check lives inside
/// a single [`ToolCallValidator::validate_all`] call.
#[derive(Debug, Clone)]
pub struct ToolCallValidator {
    registry: ToolRegistry,
    max_budget: Option<f64>,
    default_cost: f64,
}

impl Default for ToolCallValidator {
    fn default() -> Self {
        Self::new(ToolRegistry::builtin())
    }
}

impl ToolCallValidator {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            max_budget: None,
            default_cost: DEFAULT_TOOL_COST,
        }
    }

    pub fn with_budget(mut self, max_budget_usd: f64) -> Self {
        self.max_budget = Some(max_budget_usd);
        self
    }

    pub fn with_default_cost(mut self, cost_usd: f64) -> Self {
        self.default_cost = cost_usd;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn max_budget(&self) -> Option<f64> {
        self.max_budget
    }

    /// Validate one call in isolation (no budget check)
    pub fn validate(&self, call: &ToolCallData) -> ToolValidationResult {
        let mut errors = Vec::new();
        let cost = match self.registry.get(&call.tool_name) {
            Some(spec) => {
                spec.check(call, &mut errors);
                spec.cost_usd.unwrap_or(self.default_cost)
            }
            None => {
                errors.push(format!("Unknown tool: {}", call.tool_name));
                self.default_cost
            }
        };
        ToolValidationResult::new(call.tool_name.clone(), errors, Vec::new(), cost)
    }

    /// Validate a sequence of calls in order.
    ///
    /// With a budget, every call that brings the running total (its own cost
    /// included) above the budget gets a warning. Budget overruns never
    /// invalidate a call.
    pub fn validate_all(&self, calls: &[ToolCallData]) -> Vec<ToolValidationResult> {
        let mut spent = 0.0;
        calls
            .iter()
            .map(|call| {
                let mut result = self.validate(call);
                spent += result.estimated_cost;
                if let Some(budget) = self.max_budget
                    && spent > budget
                {
                    tracing::warn!(
                        tool = %call.tool_name,
                        spent,
                        budget,
                        "tool budget exceeded"
                    );
                    result.warnings.push(format!(
                        "Budget exceeded: ${:.4} spent of ${:.4}",
                        spent, budget
                    ));
                }
                result
            })
            .collect()
    }
}
