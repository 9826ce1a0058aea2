use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use bcx_registry::assistant::{assistant_router, AssistantService};
use bcx_registry::registry::{registry_router, LedgerRepository, ProjectRepository, RegistryService};
use serde_json::json;

use crate::infra::AppState;

pub(crate) fn with_service_routes<P, L>(
    assistant: Arc<AssistantService>,
    registry: Arc<RegistryService<P, L>>,
) -> Router
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    assistant_router(assistant)
        .merge(registry_router(registry))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
