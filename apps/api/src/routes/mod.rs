pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::cv::handlers as cv_handlers;
use crate::nlp::handlers as nlp_handlers;
use crate::state::AppState;

/// Framing allowed on top of an encoded file (multipart headers, JSON keys).
const BODY_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Room for the largest file once base64-encoded; handlers check the
    // decoded size against `max_file_size`.
    let body_limit = state.config.max_file_size.div_ceil(3) * 4 + BODY_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        // CV API
        .route("/api/v1/cv/parse-cv", post(cv_handlers::handle_parse_cv))
        .route("/api/v1/cv/parse-file", post(cv_handlers::handle_parse_file))
        .route("/api/v1/cv/parse-text", post(cv_handlers::handle_parse_text))
        // Text utilities
        .route("/api/v1/text/similarity", post(nlp_handlers::handle_similarity))
        .route("/api/v1/text/entities", post(nlp_handlers::handle_entities))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
