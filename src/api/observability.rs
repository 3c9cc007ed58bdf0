use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, Span, field, info, info_span};
use uuid::Uuid;

use crate::api::AppState;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        PrometheusHandle::render,
    )
}

/// Attach the landing page a request is about to the enclosing request span.
///
/// Handlers call this as soon as they know the id, so rejected and conflicting
/// submissions are still traceable to their page.
pub fn record_startup_id(startup_id: Option<&str>) {
    if let Some(id) = startup_id.map(str::trim).filter(|id| !id.is_empty()) {
        Span::current().record("startup_id", id);
    }
}

/// Coarse outcome for a finished request. A 409 is a repeat signup, which is
/// a validation signal rather than a client mistake.
fn request_outcome(status: StatusCode) -> &'static str {
    if status == StatusCode::CONFLICT {
        "conflict"
    } else if status.is_server_error() {
        "error"
    } else if status.is_client_error() {
        "rejected"
    } else {
        "success"
    }
}

/// Wraps every request in a span carrying a request id and, once a handler
/// records it, the startup id. Emits one event and the request metrics on
/// completion.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    // Route templates keep metric label cardinality bounded
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| path.clone(), |mp| mp.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        route = %route,
        startup_id = field::Empty,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status();
        let outcome = request_outcome(status);

        let labels = [
            ("method", method.to_string()),
            ("path", route),
            ("status", status.as_u16().to_string()),
            ("outcome", outcome.to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        info!(
            event = "http_request_finished",
            path = %path,
            status_code = status.as_u16(),
            outcome,
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_outcome() {
        assert_eq!(request_outcome(StatusCode::OK), "success");
        assert_eq!(request_outcome(StatusCode::CONFLICT), "conflict");
        assert_eq!(request_outcome(StatusCode::BAD_REQUEST), "rejected");
        assert_eq!(request_outcome(StatusCode::NOT_FOUND), "rejected");
        assert_eq!(request_outcome(StatusCode::INTERNAL_SERVER_ERROR), "error");
    }

    #[test]
    fn test_record_startup_id_fills_request_span() {
        use std::sync::Mutex;
        use tracing::field::{Field, Visit};
        use tracing::span::{Attributes, Id, Record};
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        #[derive(Default)]
        struct Recorded(Arc<Mutex<Vec<String>>>);

        struct Values<'a>(&'a Mutex<Vec<String>>);

        impl Visit for Values<'_> {
            fn record_str(&mut self, field: &Field, value: &str) {
                if field.name() == "startup_id" {
                    self.0.lock().unwrap().push(value.to_string());
                }
            }

            fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
        }

        impl<S: tracing::Subscriber> Layer<S> for Recorded {
            fn on_new_span(&self, _attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {}

            fn on_record(&self, _id: &Id, values: &Record<'_>, _ctx: Context<'_, S>) {
                values.record(&mut Values(&self.0));
            }
        }

        let recorded = Recorded::default();
        let seen = recorded.0.clone();
        let subscriber = tracing_subscriber::registry().with(recorded);

        tracing::subscriber::with_default(subscriber, || {
            let span = info_span!("request", startup_id = field::Empty);
            let _guard = span.enter();
            record_startup_id(Some("   "));
            record_startup_id(None);
            record_startup_id(Some(" s1 "));
        });

        assert_eq!(*seen.lock().unwrap(), vec!["s1".to_string()]);
    }
}
