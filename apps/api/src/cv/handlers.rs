use axum::{
    extract::{Multipart, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cv::pipeline::{ParsedDocument, PipelineError};
use crate::document::{DocumentFormat, RawDocument};
use crate::errors::AppError;
use crate::models::feedback::Feedback;
use crate::models::profile::Profile;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// Document sent inline: base64 bytes plus an explicit format tag.
#[derive(Deserialize)]
pub struct ParseCvRequest {
    pub file_data: String,
    pub file_type: String,
}

#[derive(Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseCvResponse {
    pub success: bool,
    pub profile_data: Profile,
    pub feedback: Feedback,
}

impl From<ParsedDocument> for ParseCvResponse {
    fn from(parsed: ParsedDocument) -> Self {
        Self {
            success: true,
            profile_data: parsed.profile,
            feedback: parsed.feedback,
        }
    }
}

/// POST /api/v1/cv/parse-cv
///
/// JSON body `{file_data, file_type}`. The tag is checked before the data is
/// decoded, so an unsupported type is reported even with a bad payload.
pub async fn handle_parse_cv(
    State(state): State<AppState>,
    Json(req): Json<ParseCvRequest>,
) -> Result<Json<ParseCvResponse>, AppError> {
    let format: DocumentFormat = req.file_type.parse().map_err(PipelineError::from)?;
    let bytes = BASE64
        .decode(req.file_data.trim())
        .map_err(|e| AppError::Validation(format!("file_data is not valid base64: {e}")))?;

    info!(%format, size = bytes.len(), "Parsing inline CV");
    parse_document(&state, Bytes::from(bytes), format).await
}

/// POST /api/v1/cv/parse-file
///
/// Multipart upload with a single `file` part. The format is taken from the
/// file name's extension.
pub async fn handle_parse_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseCvResponse>, AppError> {
    let (filename, bytes) = read_file_field(&mut multipart).await?;
    let format = DocumentFormat::from_filename(&filename).map_err(PipelineError::from)?;

    info!(%filename, %format, size = bytes.len(), "Parsing uploaded CV");
    parse_document(&state, bytes, format).await
}

/// POST /api/v1/cv/parse-text
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(req): Json<ParseTextRequest>,
) -> Result<Json<ParseCvResponse>, AppError> {
    info!(length = req.text.len(), "Parsing CV text");
    let parsed = state.pipeline.run_text(&req.text, &state.shutdown).await?;
    Ok(Json(parsed.into()))
}

async fn parse_document(
    state: &AppState,
    bytes: Bytes,
    format: DocumentFormat,
) -> Result<Json<ParseCvResponse>, AppError> {
    if bytes.len() > state.config.max_file_size {
        return Err(AppError::Validation(format!(
            "File exceeds the maximum size of {} bytes",
            state.config.max_file_size
        )));
    }

    let parsed = state
        .pipeline
        .run(
            RawDocument { bytes, format },
            state.extractor.clone(),
            &state.shutdown,
        )
        .await?;
    Ok(Json(parsed.into()))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("The file part has no file name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read the uploaded file: {e}")))?;
        return Ok((filename, bytes));
    }
    Err(AppError::Validation("No file provided".to_string()))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::cv::attempt::test_support::{FailingGenerator, RoutingGenerator};
    use crate::document::docx::test_support::build_docx;
    use crate::routes::build_router;
    use crate::state::test_support::test_state;

    const BOUNDARY: &str = "cv-api-test-boundary";

    fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/cv/parse-file")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn cv_docx() -> Vec<u8> {
        build_docx(&["Jane Doe", "jane@example.com", "SKILLS", "Rust, Docker"])
    }

    #[tokio::test]
    async fn test_parse_file_with_generator_down_returns_fallback() {
        let app = build_router(test_state(FailingGenerator));
        let (status, body) = send(app, upload(multipart_body("file", "cv.docx", &cv_docx()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["profile_data"]["email"], "jane@example.com");
        assert_eq!(body["profile_data"]["full_name"], Value::Null);
        assert_eq!(body["profile_data"]["skills"], json!({"technical": [], "soft": []}));
        assert_eq!(body["feedback"]["score"], 70);
        assert_eq!(body["feedback"]["statistics"]["wordCount"], 6);
    }

    #[tokio::test]
    async fn test_parse_file_uses_generator_output() {
        let generator = RoutingGenerator {
            routes: vec![
                (
                    "Parse the following CV text",
                    json!({"full_name": "Jane Doe", "skills": {"technical": ["Rust", "Docker"]}})
                        .to_string(),
                ),
                (
                    "Analyze this parsed CV",
                    json!({"score": 88, "confidence": 0.9}).to_string(),
                ),
            ],
        };
        let app = build_router(test_state(generator));
        let (status, body) = send(app, upload(multipart_body("file", "CV.DOCX", &cv_docx()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile_data"]["full_name"], "Jane Doe");
        assert_eq!(body["profile_data"]["skills"]["soft"], json!([]));
        assert_eq!(body["feedback"]["score"], 88);
    }

    #[tokio::test]
    async fn test_parse_file_rejects_unsupported_extension() {
        let app = build_router(test_state(FailingGenerator));
        let (status, body) = send(app, upload(multipart_body("file", "cv.txt", b"plain text"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_parse_file_requires_file_field() {
        let app = build_router(test_state(FailingGenerator));
        let (status, body) = send(app, upload(multipart_body("resume", "cv.pdf", b"%PDF"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_undecodable_document_is_unprocessable() {
        let app = build_router(test_state(FailingGenerator));
        let (status, body) = send(app, upload(multipart_body("file", "cv.docx", b"not a zip"))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let state = test_state(FailingGenerator);
        let oversized = vec![b'a'; state.config.max_file_size + 1];
        let app = build_router(state);
        let (status, _) = send(app, upload(multipart_body("file", "cv.pdf", &oversized))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_cv_decodes_inline_document() {
        let app = build_router(test_state(FailingGenerator));
        let payload = json!({"file_data": BASE64.encode(cv_docx()), "file_type": "DOCX"});
        let (status, body) = send(app, json_request("/api/v1/cv/parse-cv", payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["profile_data"]["email"], "jane@example.com");
        assert_eq!(body["feedback"]["statistics"]["wordCount"], 6);
    }

    #[tokio::test]
    async fn test_parse_cv_rejects_unknown_file_type() {
        let app = build_router(test_state(FailingGenerator));
        let payload = json!({"file_data": BASE64.encode(b"{\\rtf1}"), "file_type": "rtf"});
        let (status, body) = send(app, json_request("/api/v1/cv/parse-cv", payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_parse_cv_rejects_invalid_base64() {
        let app = build_router(test_state(FailingGenerator));
        let payload = json!({"file_data": "not base64 at all!", "file_type": "pdf"});
        let (status, body) = send(app, json_request("/api/v1/cv/parse-cv", payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_parse_text_accepts_empty_text() {
        let app = build_router(test_state(FailingGenerator));
        let (status, body) = send(
            app,
            json_request("/api/v1/cv/parse-text", json!({"text": ""})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["feedback"]["statistics"]["wordCount"], 0);
        assert_eq!(body["feedback"]["statistics"]["textLength"], 0);
    }
}
