use std::sync::Arc;

use crate::config::Config;
use crate::cv::cancel::CancelToken;
use crate::cv::pipeline::CvPipeline;
use crate::document::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only; pipeline runs share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<CvPipeline>,
    /// Document → text converter. Default: DocumentTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
    /// Fires on shutdown; in-flight pipeline runs abort with a cancellation error.
    pub shutdown: CancelToken,
}
