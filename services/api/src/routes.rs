use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use wallfin::credit::requests::{
    credit_router, CreditRequestRepository, CreditRequestService, NotificationRelay,
};

#[derive(Debug, Serialize)]
pub(crate) struct ProbeStatus {
    pub(crate) status: &'static str,
    pub(crate) checked_at: DateTime<Utc>,
}

impl ProbeStatus {
    fn now(status: &'static str) -> Self {
        Self {
            status,
            checked_at: Utc::now(),
        }
    }
}

pub(crate) fn with_credit_routes<R, N>(service: Arc<CreditRequestService<R, N>>) -> axum::Router
where
    R: CreditRequestRepository + 'static,
    N: NotificationRelay + 'static,
{
    credit_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<ProbeStatus> {
    Json(ProbeStatus::now("ok"))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.readiness.load(Ordering::Relaxed) {
        (StatusCode::OK, Json(ProbeStatus::now("ready")))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ProbeStatus::now("initializing")),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryCreditRequestRepository, LoggingNotificationRelay};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;
    use wallfin::credit::feasibility::FeasibilityConfig;

    fn app(ready: bool) -> (axum::Router, Arc<LoggingNotificationRelay>) {
        let relay = Arc::new(LoggingNotificationRelay::default());
        let service = Arc::new(CreditRequestService::new(
            Arc::new(InMemoryCreditRequestRepository::default()),
            relay.clone(),
            FeasibilityConfig::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        (with_credit_routes(service).layer(Extension(state)), relay)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let Json(probe) = healthcheck().await;
        assert_eq!(probe.status, "ok");
    }

    #[tokio::test]
    async fn readiness_follows_flag() {
        let (router, _) = app(false);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], "initializing");

        let (router, _) = app(true);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_render_as_prometheus_text() {
        let (router, _) = app(true);
        let response = router
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn credit_routes_are_mounted() {
        let (router, relay) = app(true);
        let response = router
            .clone()
            .oneshot(
                Request::get("/api/v1/credit/durations?amount=25000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["durations"]
                .as_array()
                .map(Vec::len),
            Some(11)
        );

        let payload = serde_json::json!({
            "credit_type": "pret_vacances",
            "credit_reference": "WF-VAC-2025-0003",
            "client_name": "Noor Peeters",
            "client_email": "noor.peeters@example.be",
            "amount": "1200"
        });
        let response = router
            .oneshot(
                Request::post("/api/v1/credits/additional-funds")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(relay.outbox().len(), 1);
    }
}
