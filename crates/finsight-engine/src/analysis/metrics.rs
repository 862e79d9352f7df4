use finsight_types::InsightMetrics;
use regex::Regex;
use std::sync::LazyLock;

static PERCENTAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)\s*%").unwrap());
static AMOUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*(\d+\.?\d*)").unwrap());
static RATIO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)\s*x").unwrap());

fn first_number(regex: &Regex, sentence: &str) -> Option<f64> {
    regex
        .captures(sentence)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Pull at most one percentage, dollar amount and ratio out of a sentence.
///
/// Each pass is independent and keeps only its first match. Returns `None`
/// when nothing matched.
pub fn extract_metrics(sentence: &str) -> Option<InsightMetrics> {
    let metrics = InsightMetrics {
        percentage: first_number(&PERCENTAGE_REGEX, sentence),
        amount: first_number(&AMOUNT_REGEX, sentence),
        ratio: first_number(&RATIO_REGEX, sentence),
    };
    (!metrics.is_empty()).then_some(metrics)
}
