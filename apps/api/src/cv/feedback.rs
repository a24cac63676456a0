//! Feedback/Scoring Engine: `Profile` + original text → `Feedback`.
//!
//! Primary path asks the generator for a review and clamps its numbers.
//! Fallback path returns a fixed neutral report built from word and
//! character counts only.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::cv::attempt::{attempt_json, Attempt, Cancelled, FallbackReason};
use crate::cv::cancel::CancelToken;
use crate::cv::prompts::{FEEDBACK_PROMPT, FEEDBACK_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::TextGenerator;
use crate::models::feedback::{Feedback, GeneratedFeedback};
use crate::models::profile::Profile;
use crate::nlp::entities::extract_entities;
use crate::nlp::normalize::clean;
use crate::nlp::sections::extract_sections;

pub const FALLBACK_SCORE: u8 = 70;
pub const FALLBACK_CONFIDENCE: f64 = 0.7;
pub const FALLBACK_SUGGESTION: &str = "Consider adding more details to improve your CV";

const WORD_COUNT_KEY: &str = "wordCount";
const TEXT_LENGTH_KEY: &str = "textLength";

// ────────────────────────────────────────────────────────────────────────────
// Rule-based statistics
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic measurements of the original text, sent to the generator as
/// grounding for its review.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    pub text_length: usize,
    pub word_count: usize,
    /// Length after normalization; a large gap to `text_length` means noisy extraction.
    pub clean_text_length: usize,
    pub sections_found: Vec<String>,
    pub entity_counts: BTreeMap<&'static str, usize>,
    pub populated_fields: Vec<&'static str>,
}

impl TextStatistics {
    pub fn compute(profile: &Profile, original_text: &str) -> Self {
        let entities = extract_entities(original_text);
        Self {
            text_length: char_count(original_text),
            word_count: word_count(original_text),
            clean_text_length: char_count(&clean(original_text)),
            sections_found: extract_sections(original_text).into_keys().collect(),
            entity_counts: entities.counts().into_iter().collect(),
            populated_fields: profile
                .populated_fields()
                .into_iter()
                .filter(|(_, set)| *set)
                .map(|(name, _)| name)
                .collect(),
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct FeedbackScorer {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl FeedbackScorer {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    pub async fn score(
        &self,
        profile: &Profile,
        original_text: &str,
        cancel: &CancelToken,
    ) -> Result<Feedback, Cancelled> {
        let attempt = match build_feedback_prompt(profile, original_text) {
            Ok(prompt) => {
                let system = format!("{FEEDBACK_SYSTEM} {JSON_ONLY_SYSTEM}");
                attempt_json::<GeneratedFeedback>(
                    self.generator.as_ref(),
                    &prompt,
                    &system,
                    self.timeout,
                    cancel,
                )
                .await?
            }
            Err(e) => Attempt::Fallback(FallbackReason::MalformedOutput(format!(
                "could not serialize prompt inputs: {e}"
            ))),
        };

        match attempt {
            Attempt::Produced(generated) => {
                if generated.is_out_of_range() {
                    warn!(
                        "Generator feedback out of range (score={}, confidence={}); clamping",
                        generated.score, generated.confidence
                    );
                }
                let mut feedback = generated.into_feedback();
                ensure_base_statistics(&mut feedback.statistics, original_text);
                info!(
                    "Feedback generated: score={}, confidence={:.2}, {} suggestions",
                    feedback.score,
                    feedback.confidence,
                    feedback.suggestions.len()
                );
                Ok(feedback)
            }
            Attempt::Fallback(reason) => {
                warn!("Feedback generation falling back to neutral report: {reason}");
                Ok(fallback_feedback(original_text))
            }
        }
    }
}

fn build_feedback_prompt(profile: &Profile, original_text: &str) -> serde_json::Result<String> {
    let statistics = TextStatistics::compute(profile, original_text);
    let statistics_json = serde_json::to_string_pretty(&statistics)?;
    let profile_json = serde_json::to_string_pretty(profile)?;

    // Profile JSON last: it is the only substitution that can contain braces.
    Ok(FEEDBACK_PROMPT
        .replace("{text_length}", &statistics.text_length.to_string())
        .replace("{word_count}", &statistics.word_count.to_string())
        .replace("{statistics_json}", &statistics_json)
        .replace("{profile_json}", &profile_json))
}

/// Adds word and character counts if the generator left them out.
/// Values the generator did provide are kept as-is.
fn ensure_base_statistics(statistics: &mut Map<String, Value>, original_text: &str) {
    statistics
        .entry(WORD_COUNT_KEY)
        .or_insert_with(|| json!(word_count(original_text)));
    statistics
        .entry(TEXT_LENGTH_KEY)
        .or_insert_with(|| json!(char_count(original_text)));
}

/// Neutral report used whenever the generator cannot produce one.
pub fn fallback_feedback(original_text: &str) -> Feedback {
    let words = word_count(original_text);

    let mut summary = Map::new();
    summary.insert(WORD_COUNT_KEY.to_string(), json!(words));

    let mut statistics = Map::new();
    statistics.insert(TEXT_LENGTH_KEY.to_string(), json!(char_count(original_text)));
    statistics.insert(WORD_COUNT_KEY.to_string(), json!(words));

    Feedback {
        score: FALLBACK_SCORE,
        confidence: FALLBACK_CONFIDENCE,
        summary,
        extracted_fields: Map::new(),
        missing_fields: vec![],
        suggestions: vec![FALLBACK_SUGGESTION.to_string()],
        statistics,
    }
}
