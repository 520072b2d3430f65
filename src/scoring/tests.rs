//! Unit tests for the scoring client

#[cfg(test)]
mod tests {
    use crate::config::LlmConfig;
    use crate::error::EsgError;
    use crate::scoring::llm::{extract_json, parse_analysis, parse_news_impact, truncate_for_log};
    use crate::scoring::{EsgScorer, LlmScorer};
    use crate::types::{EsgDimension, Rating};

    fn config(provider: &str) -> LlmConfig {
        LlmConfig {
            provider: provider.to_string(),
            api_key: "test-key".to_string(),
            model: None,
            base_url: None,
        }
    }

    #[test]
    fn test_report_prompt_carries_instructions_and_input() {
        let prompt = LlmScorer::build_report_prompt("ESG report excerpt");
        assert!(prompt.contains("Environmental, Social, and Governance"));
        assert!(prompt.contains("executiveSummary"));
        assert!(prompt.contains("suggestedRating"));
        assert!(prompt.contains("riskWarnings"));
        assert!(prompt.ends_with("Text: ESG report excerpt"));
    }

    #[test]
    fn test_news_prompt_carries_both_fields() {
        let prompt = LlmScorer::build_news_prompt("Mill fined", "Toxic discharge found.");
        assert!(prompt.contains("ENVIRONMENT, SOCIAL, or GOVERNANCE"));
        assert!(prompt.contains("-20 to +20"));
        assert!(prompt.contains("News Title: Mill fined"));
        assert!(prompt.contains("Summary: Toxic discharge found."));
    }

    #[test]
    fn test_extract_json_strips_fences_and_prose() {
        let wrapped = "Here is the result:\n```json\n{\"impact\": -3}\n```\nDone.";
        assert_eq!(extract_json(wrapped), "{\"impact\": -3}");

        let bare = "{\"impact\": 4}";
        assert_eq!(extract_json(bare), bare);

        // No braces at all: pass through so the parse error names the
        // actual payload.
        assert_eq!(extract_json("no json here"), "no json here");
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        assert_eq!(truncate_for_log("short ascii", 200), "short ascii");
        assert_eq!(truncate_for_log("abcdef", 4), "abcd");

        // "日" is three bytes; a cut at byte 4 would land inside the
        // second character, so the cut walks back to a boundary.
        let multibyte = "日日日";
        assert_eq!(truncate_for_log(multibyte, 4), "日");
        assert_eq!(truncate_for_log(multibyte, 9), "日日日");
        assert_eq!(truncate_for_log(multibyte, 2), "");
    }

    #[test]
    fn test_parse_analysis_happy_path() {
        let response = r#"{
            "scores": {"environmental": 88, "social": 75, "governance": 82},
            "executiveSummary": "Strong environmental record.",
            "summary": "Detailed findings here.",
            "suggestedRating": "AA",
            "riskWarnings": ["Supply chain opacity"]
        }"#;
        let result = parse_analysis(response).unwrap();
        assert_eq!(result.scores.average(), 82);
        assert_eq!(result.suggested_rating, Rating::Aa);
        assert_eq!(result.risk_warnings.len(), 1);
    }

    #[test]
    fn test_parse_analysis_rejects_malformed_json() {
        let err = parse_analysis("the model rambled instead").unwrap_err();
        assert!(matches!(err, EsgError::Json(_)));
    }

    #[test]
    fn test_parse_analysis_rejects_out_of_range_score() {
        let response = r#"{
            "scores": {"environmental": 130, "social": 75, "governance": 82},
            "executiveSummary": "x",
            "summary": "x",
            "suggestedRating": "AA",
            "riskWarnings": []
        }"#;
        let err = parse_analysis(response).unwrap_err();
        assert!(matches!(err, EsgError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_analysis_rejects_unknown_rating() {
        let response = r#"{
            "scores": {"environmental": 50, "social": 50, "governance": 50},
            "executiveSummary": "x",
            "summary": "x",
            "suggestedRating": "A+",
            "riskWarnings": []
        }"#;
        assert!(matches!(
            parse_analysis(response).unwrap_err(),
            EsgError::Json(_)
        ));
    }

    #[test]
    fn test_parse_news_impact() {
        let impact = parse_news_impact(r#"{"dimension": "SOCIAL", "impact": -15}"#).unwrap();
        assert_eq!(impact.dimension, EsgDimension::Social);
        assert_eq!(impact.impact, -15.0);

        // Dimension outside the closed set is refused.
        assert!(parse_news_impact(r#"{"dimension": "CLIMATE", "impact": -15}"#).is_err());

        // Impact outside -20..+20 is refused.
        assert!(matches!(
            parse_news_impact(r#"{"dimension": "SOCIAL", "impact": -45}"#).unwrap_err(),
            EsgError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_provider_from_config() {
        assert_eq!(LlmScorer::from_config(&config("gemini")).unwrap().name(), "Gemini");
        assert_eq!(LlmScorer::from_config(&config("claude")).unwrap().name(), "Claude");
        assert_eq!(
            LlmScorer::from_config(&config("openai")).unwrap().name(),
            "gpt-4o-mini"
        );
        assert!(LlmScorer::from_config(&config("watson")).is_err());

        // Compatible endpoints need explicit model and base_url.
        assert!(LlmScorer::from_config(&config("compatible")).is_err());
        let mut custom = config("compatible");
        custom.model = Some("qwen2.5:14b".to_string());
        custom.base_url = Some("http://localhost:11434".to_string());
        assert!(LlmScorer::from_config(&custom).is_ok());
    }
}
