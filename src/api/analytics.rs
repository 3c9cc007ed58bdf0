use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::observability::record_startup_id;
use super::validation::normalize_startup_id;
use super::{AnalyticsDto, AppState, StartupQuery};

pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StartupQuery>,
) -> Json<AnalyticsDto> {
    let startup_id = normalize_startup_id(query.startup_id);
    record_startup_id(startup_id.as_deref());
    let summary = state.analytics().summary(startup_id.as_deref()).await;
    Json(AnalyticsDto::from(summary))
}
