use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;

use super::observability::record_startup_id;
use super::validation::validate_idea;
use super::{ApiError, AppState, GenerateContentRequest};
use crate::domain::GeneratedContent;
use crate::services::GenerationRequest;

/// `POST /api/generate-content`
///
/// Always answers with usable copy once the idea is valid. Upstream and
/// store failures only show up in the logs.
pub async fn generate_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateContentRequest>, JsonRejection>,
) -> Result<Json<GeneratedContent>, ApiError> {
    let Json(payload) = payload?;
    record_startup_id(payload.startup_id.as_deref());
    let idea = validate_idea(payload.idea.as_ref())?;

    let outcome = state
        .landing_pages()
        .generate(GenerationRequest {
            idea,
            source: payload.source,
            startup_id: payload.startup_id,
        })
        .await;

    Ok(Json(outcome.content))
}
