use anyhow::Result;
use finsight_types::{FinancialInsight, ProcessedFinancialResponse};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt::Write;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Color only when writing to a terminal
pub fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

fn metrics_suffix(insight: &FinancialInsight) -> String {
    let Some(metrics) = insight.metrics else {
        return String::new();
    };
    let mut parts = Vec::new();
    if let Some(pct) = metrics.percentage {
        parts.push(format!("{}%", pct));
    }
    if let Some(amount) = metrics.amount {
        parts.push(format!("${}", amount));
    }
    if let Some(ratio) = metrics.ratio {
        parts.push(format!("{}x", ratio));
    }
    format!(" ({})", parts.join(", "))
}

/// Human-readable report of a processed response
pub fn render_text(processed: &ProcessedFinancialResponse, color: bool) -> String {
    let parsed = &processed.parsed;
    let mut out = String::new();

    let heading = |text: &str| -> String {
        if color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    };
    let verdict = |ok: bool| -> String {
        match (ok, color) {
            (true, true) => "ok".green().to_string(),
            (true, false) => "ok".to_string(),
            (false, true) => "invalid".red().to_string(),
            (false, false) => "invalid".to_string(),
        }
    };

    let _ = writeln!(out, "{} {} ({})", heading("model:"), parsed.model, parsed.provider);
    let _ = writeln!(
        out,
        "{} {} in / {} out / {} total",
        heading("tokens:"),
        parsed.usage.input_tokens,
        parsed.usage.output_tokens,
        parsed.usage.total()
    );
    let _ = writeln!(
        out,
        "{} {}",
        heading("reasoning:"),
        if parsed.has_reasoning() { "yes" } else { "no" }
    );

    let _ = writeln!(out, "{} {}", heading("insights:"), processed.all_insights.len());
    for insight in &processed.all_insights {
        let source = format!("{:?}", insight.source).to_lowercase();
        let _ = writeln!(
            out,
            "  [{}] {:<11} {}{}",
            source,
            insight.insight_type.as_str(),
            insight.content,
            metrics_suffix(insight)
        );
    }

    let _ = writeln!(
        out,
        "{} {} (total ${:.4})",
        heading("tools:"),
        verdict(processed.tools_valid()),
        processed.total_tool_cost()
    );
    for validation in &processed.tool_validations {
        let _ = writeln!(
            out,
            "  {:<7} {} ${:.4}",
            verdict(validation.is_valid),
            validation.tool_name,
            validation.estimated_cost
        );
        for error in &validation.errors {
            let _ = writeln!(out, "          error: {}", error);
        }
        for warning in &validation.warnings {
            let _ = writeln!(out, "          warning: {}", warning);
        }
    }

    if !parsed.parse_errors.is_empty() {
        let _ = writeln!(out, "{}", heading("parse errors:"));
        for error in &parsed.parse_errors {
            let _ = writeln!(out, "  {}", error);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_engine::ResponseHandler;
    use finsight_types::Provider;
    use serde_json::json;

    #[test]
    fn test_render_text_plain() {
        let handler = ResponseHandler::for_provider(&Provider::Anthropic).unwrap();
        let processed = handler.process(&json!({
            "model": "claude-3-5-sonnet-20241022",
            "content": [
                {"type": "text", "text": "Margins expanded 3%."},
                {"type": "tool_use", "id": "t1", "name": "delete_everything", "input": {}}
            ],
            "usage": {"input_tokens": 7, "output_tokens": 3}
        }));

        let text = render_text(&processed, false);
        assert_eq!(
            text,
            "model: claude-3-5-sonnet-20241022 (anthropic)\n\
             tokens: 7 in / 3 out / 10 total\n\
             reasoning: no\n\
             insights: 1\n  \
             [text] performance Margins expanded 3% (3%)\n\
             tools: invalid (total $0.0010)\n  \
             invalid delete_everything $0.0010\n          \
             error: Unknown tool: delete_everything\n"
        );
    }
}
