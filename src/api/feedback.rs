use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::observability::record_startup_id;
use super::validation::normalize_startup_id;
use super::{
    ApiError, AppState, FeedbackAck, FeedbackDto, FeedbackList, FeedbackRequest, StartupQuery,
};
use crate::services::NewFeedback;

pub async fn create_feedback(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackAck>, ApiError> {
    let Json(payload) = payload?;
    record_startup_id(payload.startup_id.as_deref());

    let recorded = state
        .feedback()
        .record(NewFeedback {
            startup_id: payload.startup_id,
            feedback: payload.feedback,
            rating: payload.rating,
            source: payload.source,
        })
        .await?;

    Ok(Json(FeedbackAck {
        success: true,
        feedback_id: recorded.id,
        stored: recorded.stored,
    }))
}

pub async fn list_feedback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StartupQuery>,
) -> Json<FeedbackList> {
    let startup_id = normalize_startup_id(query.startup_id);
    record_startup_id(startup_id.as_deref());
    let feedback = state.feedback().list(startup_id.as_deref()).await;

    Json(FeedbackList {
        feedback: feedback.into_iter().map(FeedbackDto::from).collect(),
    })
}
