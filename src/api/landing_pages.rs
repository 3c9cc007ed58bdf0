use axum::{Json, extract::State};
use std::sync::Arc;

use super::{AppState, LandingPageDto};

/// `GET /api/landing-pages`
///
/// Newest first. Any store problem yields an empty list, never an error.
pub async fn list_landing_pages(State(state): State<Arc<AppState>>) -> Json<Vec<LandingPageDto>> {
    let pages = state.landing_pages().list().await;
    Json(pages.into_iter().map(LandingPageDto::from).collect())
}
