//! Pipeline Orchestrator: document bytes → (`Profile`, `Feedback`).
//!
//! Flow: text extractor (blocking thread) → profile extractor → feedback
//! scorer. Each run is independent; the pipeline holds only read-only
//! configuration and the shared generator handle.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::cv::attempt::Cancelled;
use crate::cv::cancel::CancelToken;
use crate::cv::feedback::FeedbackScorer;
use crate::cv::profile_extractor::ProfileExtractor;
use crate::document::{ExtractError, RawDocument, TextExtractor};
use crate::llm_client::{GeneratorSettings, TextGenerator};
use crate::models::feedback::Feedback;
use crate::models::profile::Profile;

/// Failures a pipeline run surfaces to its caller. Generator trouble never
/// appears here; it is absorbed by the fallback paths.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Decode(String),

    #[error("Pipeline run cancelled")]
    Cancelled,

    #[error("Internal pipeline error: {0}")]
    Internal(String),
}

impl From<ExtractError> for PipelineError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::UnsupportedFormat(tag) => PipelineError::UnsupportedFormat(tag),
            decode @ ExtractError::Decode { .. } => PipelineError::Decode(decode.to_string()),
        }
    }
}

impl From<Cancelled> for PipelineError {
    fn from(_: Cancelled) -> Self {
        PipelineError::Cancelled
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedDocument {
    pub profile: Profile,
    pub feedback: Feedback,
}

#[derive(Clone)]
pub struct CvPipeline {
    profiles: ProfileExtractor,
    scorer: FeedbackScorer,
}

impl CvPipeline {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: &GeneratorSettings) -> Self {
        Self {
            profiles: ProfileExtractor::new(generator.clone(), settings.timeout),
            scorer: FeedbackScorer::new(generator, settings.timeout),
        }
    }

    /// Reads `raw` with `extractor`, then extracts and scores the profile.
    ///
    /// Unreadable documents and cancellation are the only failures.
    pub async fn run(
        &self,
        raw: RawDocument,
        extractor: Arc<dyn TextExtractor>,
        cancel: &CancelToken,
    ) -> Result<ParsedDocument, PipelineError> {
        let run_id = Uuid::new_v4();
        info!(
            "[{run_id}] Pipeline start: format={}, bytes={}",
            raw.format,
            raw.bytes.len()
        );

        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let format = raw.format;
        let extraction = tokio::task::spawn_blocking(move || extractor.extract(&raw.bytes, raw.format));
        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
            joined = extraction => match joined {
                Ok(result) => result.inspect_err(|e| error!("[{run_id}] Text extraction failed: {e}"))?,
                Err(join_err) if join_err.is_panic() => {
                    error!("[{run_id}] Text extractor panicked on {format} input");
                    return Err(PipelineError::Decode(format!(
                        "Could not decode {format} document: extractor panicked"
                    )));
                }
                Err(join_err) => return Err(PipelineError::Internal(join_err.to_string())),
            },
        };

        self.run_on_text(run_id, &text, cancel).await
    }

    /// Runs extraction and scoring on already-extracted text.
    pub async fn run_text(
        &self,
        text: &str,
        cancel: &CancelToken,
    ) -> Result<ParsedDocument, PipelineError> {
        self.run_on_text(Uuid::new_v4(), text, cancel).await
    }

    async fn run_on_text(
        &self,
        run_id: Uuid,
        text: &str,
        cancel: &CancelToken,
    ) -> Result<ParsedDocument, PipelineError> {
        let started = Instant::now();
        info!("[{run_id}] Extracted {} characters of text", text.chars().count());

        let profile = self.profiles.extract_profile(text, cancel).await?;
        let feedback = self.scorer.score(&profile, text, cancel).await?;

        info!(
            "[{run_id}] Pipeline complete in {}ms: score={}, confidence={:.2}",
            started.elapsed().as_millis(),
            feedback.score,
            feedback.confidence
        );

        Ok(ParsedDocument { profile, feedback })
    }
}
