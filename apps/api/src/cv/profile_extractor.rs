//! Structured Field Extractor: raw CV text → `Profile`.
//!
//! Primary path: one generator call returning the profile as JSON.
//! Fallback path: a default profile with only email/phone filled in by the
//! rule-based matchers. The fallback covers every generator or parse failure,
//! so the only error this returns is cancellation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cv::attempt::{attempt_json, Attempt, Cancelled};
use crate::cv::cancel::CancelToken;
use crate::cv::prompts::{PROFILE_EXTRACT_PROMPT, PROFILE_EXTRACT_SYSTEM};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};
use crate::llm_client::TextGenerator;
use crate::models::profile::Profile;
use crate::nlp::entities::{first_email, first_phone};

#[derive(Clone)]
pub struct ProfileExtractor {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl ProfileExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    /// Extracts a profile from `text`, as extracted from the document and
    /// without normalization (line structure helps the model).
    pub async fn extract_profile(
        &self,
        text: &str,
        cancel: &CancelToken,
    ) -> Result<Profile, Cancelled> {
        let prompt = PROFILE_EXTRACT_PROMPT.replace("{raw_text}", text);
        let system = format!("{PROFILE_EXTRACT_SYSTEM} {JSON_ONLY_SYSTEM} {NO_INVENTION_INSTRUCTION}");

        match attempt_json::<Profile>(self.generator.as_ref(), &prompt, &system, self.timeout, cancel)
            .await?
        {
            Attempt::Produced(profile) => {
                info!(
                    "Profile extracted by generator: {} experience, {} education entries",
                    profile.work_experience.len(),
                    profile.education.len()
                );
                Ok(profile)
            }
            Attempt::Fallback(reason) => {
                warn!("Profile extraction falling back to rule-based parsing: {reason}");
                Ok(fallback_profile(text))
            }
        }
    }
}

/// Minimal profile: every field at its default except the first email and
/// phone found in `text`.
pub fn fallback_profile(text: &str) -> Profile {
    Profile {
        email: first_email(text),
        phone: first_phone(text),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::attempt::test_support::{CannedGenerator, FailingGenerator, HangingGenerator};
    use crate::cv::cancel::cancel_pair;
    use crate::models::profile::Skills;
    use serde_json::json;

    const CV_TEXT: &str = "Jane Doe\nSenior Engineer\nContact me at jane.doe@example.com or (415) 555-1234\nEXPERIENCE\nWorked at Acme";

    fn extractor(generator: impl TextGenerator + 'static) -> ProfileExtractor {
        ProfileExtractor::new(Arc::new(generator), Duration::from_secs(5))
    }

    #[test]
    fn test_fallback_profile_only_sets_contact_fields() {
        let profile = fallback_profile(CV_TEXT);
        let expected = Profile {
            email: Some("jane.doe@example.com".to_string()),
            phone: Some("4155551234".to_string()),
            ..Default::default()
        };
        assert_eq!(profile, expected);
        assert_eq!(profile.skills, Skills::default());
    }

    #[test]
    fn test_fallback_profile_on_empty_text_is_default() {
        assert_eq!(fallback_profile(""), Profile::default());
    }

    #[tokio::test]
    async fn test_failing_generator_uses_fallback() {
        let profile = extractor(FailingGenerator)
            .extract_profile(CV_TEXT, &CancelToken::never())
            .await
            .unwrap();
        assert_eq!(profile, fallback_profile(CV_TEXT));
    }

    #[tokio::test]
    async fn test_malformed_output_uses_fallback() {
        let generator = CannedGenerator::new(r#"{"full_name": "Jane", "skills": ["Rust"]"#);
        let profile = extractor(generator)
            .extract_profile(CV_TEXT, &CancelToken::never())
            .await
            .unwrap();
        assert_eq!(profile.full_name, None);
        assert_eq!(profile.email.as_deref(), Some("jane.doe@example.com"));
    }

    #[tokio::test]
    async fn test_wrong_shape_uses_fallback() {
        // skills must be an object with technical/soft lists.
        let generator = CannedGenerator::new(r#"{"full_name": "Jane", "skills": ["Rust"]}"#);
        let profile = extractor(generator)
            .extract_profile(CV_TEXT, &CancelToken::never())
            .await
            .unwrap();
        assert_eq!(profile, fallback_profile(CV_TEXT));
    }

    #[tokio::test]
    async fn test_array_output_uses_fallback() {
        let generator = CannedGenerator::new(r#"["Python", "Rust", "Docker"]"#);
        let profile = extractor(generator)
            .extract_profile(CV_TEXT, &CancelToken::never())
            .await
            .unwrap();
        assert_eq!(profile.full_name, None);
        assert_eq!(profile.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(profile.phone.as_deref(), Some("4155551234"));
    }

    #[tokio::test]
    async fn test_well_formed_output_passes_through() {
        let response = json!({
            "full_name": "Jane Doe",
            "email": "jane.doe@example.com",
            "phone": "(415) 555-1234",
            "location": "San Francisco",
            "headline": "Senior Engineer",
            "summary": null,
            "work_experience": [{"company": "Acme", "title": "Engineer"}],
            "education": [],
            "skills": {"technical": ["Rust", "Go"], "soft": ["Mentoring"]},
            "certifications": [],
            "projects": [],
            "languages": ["English"],
            "achievements": []
        });
        let expected: Profile = serde_json::from_value(response.clone()).unwrap();
        let generator = CannedGenerator::new(format!("```json\n{response}\n```"));

        let profile = extractor(generator)
            .extract_profile(CV_TEXT, &CancelToken::never())
            .await
            .unwrap();
        assert_eq!(profile, expected);
        assert_eq!(profile.phone.as_deref(), Some("(415) 555-1234"));
        assert_eq!(profile.work_experience[0]["company"], "Acme");
    }

    #[tokio::test]
    async fn test_cancellation_is_not_converted_to_fallback() {
        let (handle, token) = cancel_pair();
        let extractor = extractor(HangingGenerator);
        let task = tokio::spawn(async move { extractor.extract_profile(CV_TEXT, &token).await });
        tokio::task::yield_now().await;
        handle.cancel();
        let result = task.await.unwrap();
        assert_eq!(result, Err(Cancelled));
    }
}
