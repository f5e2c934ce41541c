use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCreditRequestRepository, LoggingNotificationRelay};
use crate::routes::with_credit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use wallfin::config::AppConfig;
use wallfin::credit::requests::CreditRequestService;
use wallfin::error::AppError;
use wallfin::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let credit_service = Arc::new(CreditRequestService::new(
        Arc::new(InMemoryCreditRequestRepository::default()),
        Arc::new(LoggingNotificationRelay::default()),
        config.feasibility.clone(),
    ));

    let app = with_credit_routes(credit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        debt_ratio_cap = %config.feasibility.debt_ratio_cap,
        "wallfin credit service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
