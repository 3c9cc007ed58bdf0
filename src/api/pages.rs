use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::AppState;
use super::observability::record_startup_id;
use crate::render::{self, LandingPage};
use crate::services::GenerationRequest;

#[derive(Debug, Deserialize)]
pub struct IdeaForm {
    #[serde(default)]
    pub idea: String,
    pub source: Option<String>,
}

/// `GET /`
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let recent = state.landing_pages().list().await;
    Html(render::index_page(&recent, None))
}

/// `POST /ideas`
///
/// Generates copy for the submitted idea and renders it straight away.
pub async fn submit_idea(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IdeaForm>,
) -> Response {
    let idea = form.idea.trim();
    if idea.is_empty() {
        let recent = state.landing_pages().list().await;
        return (
            StatusCode::BAD_REQUEST,
            Html(render::index_page(&recent, Some("Idea is required"))),
        )
            .into_response();
    }

    let outcome = state
        .landing_pages()
        .generate(GenerationRequest {
            idea: idea.to_string(),
            source: form.source,
            startup_id: None,
        })
        .await;
    record_startup_id(Some(outcome.startup_id.as_str()));

    let poll_seconds = state.config().read().await.server.analytics_poll_seconds;

    Html(render::landing_page(
        &LandingPage {
            startup_id: &outcome.startup_id,
            idea,
            source: &outcome.source,
            content: &outcome.content,
        },
        poll_seconds,
    ))
    .into_response()
}

/// `GET /p/{startup_id}`
pub async fn show_landing_page(
    State(state): State<Arc<AppState>>,
    Path(startup_id): Path<String>,
) -> Response {
    record_startup_id(Some(startup_id.as_str()));
    let Some(record) = state.landing_pages().find(&startup_id).await else {
        return (
            StatusCode::NOT_FOUND,
            Html(render::not_found_page(&startup_id)),
        )
            .into_response();
    };

    let poll_seconds = state.config().read().await.server.analytics_poll_seconds;
    Html(render::landing_page(&LandingPage::from(&record), poll_seconds)).into_response()
}
