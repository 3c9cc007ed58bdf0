use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::info;

use super::observability::record_startup_id;
use super::validation::normalize_startup_id;
use super::{ApiError, AppState, SignupAck, SignupDto, SignupList, SignupRequest, StartupQuery};
use crate::services::NewSignup;

pub async fn create_signup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<SignupAck>, ApiError> {
    let Json(payload) = payload?;
    record_startup_id(payload.startup_id.as_deref());

    let recorded = state
        .signups()
        .record(NewSignup {
            email: payload.email,
            startup_id: payload.startup_id,
            source: payload.source,
            would_pay: payload.would_pay,
            price_point: payload.price_point,
        })
        .await?;

    info!(signup_id = %recorded.id, stored = recorded.stored, "Signup accepted");

    Ok(Json(SignupAck {
        success: true,
        signup_id: recorded.id,
        stored: recorded.stored,
    }))
}

pub async fn list_signups(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StartupQuery>,
) -> Json<SignupList> {
    let startup_id = normalize_startup_id(query.startup_id);
    record_startup_id(startup_id.as_deref());
    let signups = state.signups().list(startup_id.as_deref()).await;

    Json(SignupList {
        signups: signups.into_iter().map(SignupDto::from).collect(),
    })
}
