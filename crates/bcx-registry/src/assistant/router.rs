use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use super::domain::{
    IntegrityResult, IntegrityScoreInput, PriceAdvice, PriceInput, ProjectDraft,
    ValidationVerdict,
};
use super::service::AssistantService;

/// Router builder exposing the integrity assistant endpoints.
pub fn assistant_router(service: Arc<AssistantService>) -> Router {
    Router::new()
        .route("/api/v1/ai/validate", post(validate_handler))
        .route("/api/v1/ai/integrity-score", post(integrity_handler))
        .route("/api/v1/ai/price", post(price_handler))
        .with_state(service)
}

pub(crate) async fn validate_handler(
    State(service): State<Arc<AssistantService>>,
    Json(project): Json<ProjectDraft>,
) -> Json<ValidationVerdict> {
    Json(service.validate(&project).await)
}

pub(crate) async fn integrity_handler(
    State(service): State<Arc<AssistantService>>,
    Json(input): Json<IntegrityScoreInput>,
) -> Json<IntegrityResult> {
    Json(service.integrity_score(&input).await)
}

pub(crate) async fn price_handler(
    State(service): State<Arc<AssistantService>>,
    Json(input): Json<PriceInput>,
) -> Json<PriceAdvice> {
    Json(service.suggest_price(&input).await)
}
