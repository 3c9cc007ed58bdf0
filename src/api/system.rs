use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::warn;

use super::{AppState, HealthDto};
use crate::db::StoreHandle;

/// `GET /api/health`
///
/// The service keeps answering without a store, so this is always 200.
/// `store` tells whether records are currently being kept.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let store = match state.shared.store().await {
        StoreHandle::Available(store) => match store.ping().await {
            Ok(()) => "connected",
            Err(e) => {
                warn!(error = %e, "Store ping failed");
                "unreachable"
            }
        },
        handle @ StoreHandle::Unavailable(_) => handle.status(),
    };

    Json(HealthDto { status: "ok", store })
}
