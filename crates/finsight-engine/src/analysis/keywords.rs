use finsight_types::InsightType;

/// Keywords that mark a sentence as one insight type
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    pub insight_type: InsightType,
    /// Lower-case substrings
    pub keywords: &'static [&'static str],
}

/// Classification table, in priority order. The first set with a matching
/// keyword decides the type.
pub const KEYWORD_TABLE: &[KeywordSet] = &[
    KeywordSet {
        insight_type: InsightType::Valuation,
        keywords: &[
            "valuation",
            "p/e",
            "price-to-earnings",
            "fair value",
            "intrinsic value",
            "undervalued",
            "overvalued",
            "multiple",
            "dcf",
            "price target",
            "book value",
        ],
    },
    KeywordSet {
        insight_type: InsightType::Risk,
        keywords: &[
            "risk",
            "volatility",
            "downside",
            "exposure",
            "uncertainty",
            "debt",
            "leverage",
            "drawdown",
            "default",
        ],
    },
    KeywordSet {
        insight_type: InsightType::Performance,
        keywords: &[
            "revenue",
            "earnings",
            "growth",
            "margin",
            "profit",
            "return",
            "performance",
            "eps",
        ],
    },
    KeywordSet {
        insight_type: InsightType::Forecast,
        keywords: &[
            "forecast",
            "outlook",
            "guidance",
            "projection",
            "predict",
            "estimate",
            "we expect",
            "expected to",
            "next quarter",
            "next year",
        ],
    },
    KeywordSet {
        insight_type: InsightType::Anomaly,
        keywords: &[
            "anomaly",
            "unusual",
            "unexpected",
            "outlier",
            "irregular",
            "spike",
            "discrepancy",
        ],
    },
];

/// Classify an already lower-cased sentence; `None` when no set matches
pub fn classify(table: &[KeywordSet], lowered: &str) -> Option<InsightType> {
    table
        .iter()
        .find(|set| set.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|set| set.insight_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        // Matches both valuation and risk keywords
        assert_eq!(
            classify(KEYWORD_TABLE, "downside to our price target is limited"),
            Some(InsightType::Valuation)
        );
        // Matches both risk and performance keywords
        assert_eq!(
            classify(KEYWORD_TABLE, "volatility since the earnings call"),
            Some(InsightType::Risk)
        );
        assert_eq!(
            classify(KEYWORD_TABLE, "an unusual spike in volume"),
            Some(InsightType::Anomaly)
        );
    }

    #[test]
    fn test_unmatched_sentence() {
        assert_eq!(classify(KEYWORD_TABLE, "the meeting is on tuesday"), None);
    }

    #[test]
    fn test_every_type_but_unknown_is_reachable() {
        let types: Vec<InsightType> = KEYWORD_TABLE.iter().map(|s| s.insight_type).collect();
        assert_eq!(
            types,
            vec![
                InsightType::Valuation,
                InsightType::Risk,
                InsightType::Performance,
                InsightType::Forecast,
                InsightType::Anomaly,
            ]
        );
    }
}
