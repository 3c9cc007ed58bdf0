use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{AnalyticsService, FeedbackService, LandingPageService, SignupService};
use crate::state::SharedState;

mod analytics;
mod assets;
mod content;
mod error;
mod feedback;
mod landing_pages;
mod observability;
mod pages;
mod signups;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn landing_pages(&self) -> &Arc<LandingPageService> {
        &self.shared.landing_pages
    }

    #[must_use]
    pub fn signups(&self) -> &Arc<SignupService> {
        &self.shared.signups
    }

    #[must_use]
    pub fn feedback(&self) -> &Arc<FeedbackService> {
        &self.shared.feedback
    }

    #[must_use]
    pub fn analytics(&self) -> &Arc<AnalyticsService> {
        &self.shared.analytics
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config)?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().read().await.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/generate-content", post(content::generate_content))
        .route(
            "/signup",
            get(signups::list_signups).post(signups::create_signup),
        )
        .route(
            "/feedback",
            get(feedback::list_feedback).post(feedback::create_feedback),
        )
        .route("/landing-pages", get(landing_pages::list_landing_pages))
        .route("/analytics", get(analytics::get_analytics))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state.clone());

    let page_router = Router::new()
        .route("/", get(pages::index))
        .route("/ideas", post(pages::submit_idea))
        .route("/p/{startup_id}", get(pages::show_landing_page))
        .route("/assets/{*path}", get(assets::serve_asset))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .merge(page_router)
        .fallback(assets::not_found)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
}
