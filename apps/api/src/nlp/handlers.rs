use axum::Json;
use serde::{Deserialize, Serialize};

use crate::nlp::entities::{extract_entities, EntityBag};
use crate::nlp::sections::{extract_sections, SectionMap};
use crate::nlp::similarity::similarity;

#[derive(Deserialize)]
pub struct SimilarityRequest {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Serialize)]
pub struct SimilarityResponse {
    pub similarity: f64,
}

#[derive(Deserialize)]
pub struct EntitiesRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct EntitiesResponse {
    pub entities: EntityBag,
    pub sections: SectionMap,
}

/// POST /api/v1/text/similarity
pub async fn handle_similarity(Json(req): Json<SimilarityRequest>) -> Json<SimilarityResponse> {
    Json(SimilarityResponse {
        similarity: similarity(&req.a, &req.b),
    })
}

/// POST /api/v1/text/entities
pub async fn handle_entities(Json(req): Json<EntitiesRequest>) -> Json<EntitiesResponse> {
    Json(EntitiesResponse {
        entities: extract_entities(&req.text),
        sections: extract_sections(&req.text),
    })
}
