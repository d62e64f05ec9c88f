//! Verdict and score normalization
//!
//! The scoring service's verdict strings are free-form ("likely_ai",
//! "Likely Human (AI-assisted)", ...). Normalization is substring-based
//! with fixed priority: "human" is checked before "ai", so a verdict
//! containing both resolves to Human. That ordering is part of the
//! observable contract and has a regression test.

use crate::wire::AnalyzeResponse;
use trustlens_core::{ClassificationResult, Verdict};

/// Raw score substituted when the service omits one; normalizes to 0.5.
pub const MIDPOINT_RAW_SCORE: f64 = 50.0;

/// Map a raw verdict string onto the three-way verdict.
pub fn normalize_verdict(raw: &str) -> Verdict {
    let lower = raw.to_lowercase();
    if lower.contains("human") {
        Verdict::Human
    } else if lower.contains("ai") {
        Verdict::Ai
    } else {
        Verdict::Uncertain
    }
}

/// Map a raw score onto [0, 1].
///
/// Values above 1 are treated as 0-100 percentages and divided by 100,
/// then the result is clamped.
pub fn normalize_score(raw: f64) -> f64 {
    let unit = if raw > 1.0 { raw / 100.0 } else { raw };
    unit.clamp(0.0, 1.0)
}

/// Decode a service response into a classification, applying the named
/// fallbacks for absent fields.
pub fn normalize_response(response: AnalyzeResponse) -> ClassificationResult {
    let trust = response.trust.unwrap_or_default();
    let verdict = normalize_verdict(trust.verdict.as_deref().unwrap_or(""));
    let score = normalize_score(trust.trust_score.unwrap_or(MIDPOINT_RAW_SCORE));

    ClassificationResult {
        verdict,
        score,
        explanations: trust.explanations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_substring_priority() {
        assert_eq!(
            normalize_verdict("Likely Human (AI-assisted)"),
            Verdict::Human
        );
        assert_eq!(normalize_verdict("AI Generated"), Verdict::Ai);
        assert_eq!(normalize_verdict("likely_ai"), Verdict::Ai);
        assert_eq!(normalize_verdict(""), Verdict::Uncertain);
        assert_eq!(normalize_verdict("inconclusive"), Verdict::Uncertain);
    }

    #[test]
    fn test_score_percentage_detection() {
        assert_eq!(normalize_score(75.0), 0.75);
        assert_eq!(normalize_score(0.3), 0.3);
        assert_eq!(normalize_score(150.0), 1.0);
        assert_eq!(normalize_score(1.0), 1.0);
        assert_eq!(normalize_score(-3.0), 0.0);
    }

    #[test]
    fn test_empty_response_falls_back_to_midpoint() {
        let result = normalize_response(AnalyzeResponse::default());
        assert_eq!(result.verdict, Verdict::Uncertain);
        assert_eq!(result.score, 0.5);
        assert!(result.explanations.is_empty());
    }

    #[test]
    fn test_full_response_normalizes() {
        let response: AnalyzeResponse = serde_json::from_str(
            r#"{"trust": {"verdict": "likely_ai", "trust_score": 95, "explanations": ["no_content_credentials"]}}"#,
        )
        .unwrap();
        let result = normalize_response(response);

        assert_eq!(result.verdict, Verdict::Ai);
        assert_eq!(result.score, 0.95);
        assert_eq!(result.explanations, vec!["no_content_credentials"]);
    }
}
