use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::null_as_default;

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Quality report for an extracted profile.
///
/// `score` is always within `0..=100` and `confidence` within `0.0..=1.0`,
/// whichever path produced the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub score: u8,
    pub confidence: f64,
    pub summary: Map<String, Value>,
    pub extracted_fields: Map<String, Value>,
    pub missing_fields: Vec<String>,
    pub suggestions: Vec<String>,
    pub statistics: Map<String, Value>,
}

/// Feedback as returned by the generator, before range enforcement.
///
/// `score` and `confidence` are required; everything else tolerates absence
/// or `null`. Numbers are taken as `f64` so that `87.5` or `140` still parse
/// and get clamped instead of rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedFeedback {
    pub score: f64,
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extracted_fields: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_fields: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub statistics: Map<String, Value>,
}

impl GeneratedFeedback {
    /// Whether either bounded value falls outside its range.
    pub fn is_out_of_range(&self) -> bool {
        !(f64::from(MIN_SCORE)..=f64::from(MAX_SCORE)).contains(&self.score)
            || !(0.0..=1.0).contains(&self.confidence)
    }

    pub fn into_feedback(self) -> Feedback {
        Feedback {
            score: clamp_score(self.score),
            confidence: clamp_confidence(self.confidence),
            summary: self.summary,
            extracted_fields: self.extracted_fields,
            missing_fields: self.missing_fields,
            suggestions: self.suggestions,
            statistics: self.statistics,
        }
    }
}

/// Rounds and clamps a raw score into `0..=100`.
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return MIN_SCORE;
    }
    raw.round()
        .clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

/// Clamps a raw confidence into `0.0..=1.0`.
pub fn clamp_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clamp_score_bounds_and_rounding() {
        assert_eq!(clamp_score(-20.0), 0);
        assert_eq!(clamp_score(140.0), 100);
        assert_eq!(clamp_score(87.5), 88);
        assert_eq!(clamp_score(42.0), 42);
        assert_eq!(clamp_score(f64::NAN), 0);
    }

    #[test]
    fn test_clamp_confidence_bounds() {
        assert_eq!(clamp_confidence(1.7), 1.0);
        assert_eq!(clamp_confidence(-0.1), 0.0);
        assert_eq!(clamp_confidence(0.85), 0.85);
        assert_eq!(clamp_confidence(f64::NAN), 0.0);
    }

    #[test]
    fn test_generated_feedback_requires_score_and_confidence() {
        let result: Result<GeneratedFeedback, _> =
            serde_json::from_value(json!({"score": 80, "suggestions": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_generated_feedback_defaults_optional_parts() {
        let generated: GeneratedFeedback =
            serde_json::from_value(json!({"score": 80, "confidence": 0.9, "summary": null}))
                .unwrap();
        assert!(!generated.is_out_of_range());
        let feedback = generated.into_feedback();
        assert_eq!(feedback.score, 80);
        assert!(feedback.summary.is_empty());
        assert!(feedback.missing_fields.is_empty());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let generated: GeneratedFeedback =
            serde_json::from_value(json!({"score": 250, "confidence": 3})).unwrap();
        assert!(generated.is_out_of_range());
        let feedback = generated.into_feedback();
        assert_eq!(feedback.score, 100);
        assert_eq!(feedback.confidence, 1.0);
    }
}
