use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bcx_registry::assistant::AssistantService;
use bcx_registry::config::AppConfig;
use bcx_registry::error::AppError;
use bcx_registry::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{seeded_registry, AppState};
use crate::routes::with_service_routes;

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

    let assistant = Arc::new(AssistantService::new(config.assistant.latency_profile()));
    let registry = Arc::new(seeded_registry());

    let app = with_service_routes(assistant, registry)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        simulated_latency = config.assistant.simulate_latency,
        "bcx registry ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
