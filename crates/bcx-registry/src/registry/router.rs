use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{MarketplaceFilter, ProjectFilter, ProjectId};
use super::repository::{LedgerRepository, ProjectRepository, RepositoryError};
use super::service::{RegistryError, RegistryService};
use crate::assistant::ProjectDraft;

type SharedRegistry<P, L> = State<Arc<RegistryService<P, L>>>;

#[derive(Debug, Deserialize)]
pub(crate) struct RejectRequest {
    pub(crate) reason: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueRequest {
    pub(crate) quantity: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PurchaseRequest {
    pub(crate) project_id: String,
    pub(crate) quantity: u64,
    pub(crate) buyer_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RetireRequest {
    pub(crate) project_id: String,
    pub(crate) quantity: u64,
    pub(crate) buyer_id: String,
    pub(crate) reason: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LedgerQuery {
    #[serde(default = "default_page")]
    pub(crate) page: usize,
    #[serde(default = "default_page_size")]
    pub(crate) page_size: usize,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    20
}

/// Router builder exposing registry, marketplace, ledger, and dashboard endpoints.
pub fn registry_router<P, L>(service: Arc<RegistryService<P, L>>) -> Router
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects",
            post(register_handler::<P, L>).get(list_handler::<P, L>),
        )
        .route("/api/v1/projects/:project_id", get(project_handler::<P, L>))
        .route(
            "/api/v1/projects/:project_id/approve",
            post(approve_handler::<P, L>),
        )
        .route(
            "/api/v1/projects/:project_id/reject",
            post(reject_handler::<P, L>),
        )
        .route(
            "/api/v1/projects/:project_id/credits",
            post(issue_handler::<P, L>),
        )
        .route(
            "/api/v1/projects/:project_id/price",
            get(price_handler::<P, L>),
        )
        .route("/api/v1/marketplace", get(marketplace_handler::<P, L>))
        .route(
            "/api/v1/marketplace/purchase",
            post(purchase_handler::<P, L>),
        )
        .route("/api/v1/credits/retire", post(retire_handler::<P, L>))
        .route("/api/v1/ledger", get(ledger_handler::<P, L>))
        .route("/api/v1/admin/stats", get(admin_stats_handler::<P, L>))
        .route(
            "/api/v1/buyers/:buyer_id/portfolio",
            get(portfolio_handler::<P, L>),
        )
        .with_state(service)
}

pub(crate) fn error_response(err: RegistryError) -> Response {
    let status = match &err {
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::InvalidTransition { .. } => StatusCode::CONFLICT,
        RegistryError::InvalidProject(_) | RegistryError::InvalidQuantity { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        RegistryError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        RegistryError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        RegistryError::Repository(RepositoryError::Unavailable(_)) => {
            error!(error = %err, "registry storage unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

fn respond<T: serde::Serialize>(status: StatusCode, result: Result<T, RegistryError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn register_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Json(draft): Json<ProjectDraft>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(StatusCode::CREATED, service.register_project(draft))
}

pub(crate) async fn list_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Query(filter): Query<ProjectFilter>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(StatusCode::OK, service.projects(&filter))
}

pub(crate) async fn project_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Path(project_id): Path<String>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(StatusCode::OK, service.project(&ProjectId(project_id)))
}

pub(crate) async fn approve_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Path(project_id): Path<String>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.approve_project(&ProjectId(project_id)),
    )
}

pub(crate) async fn reject_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Path(project_id): Path<String>,
    Json(request): Json<RejectRequest>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.reject_project(&ProjectId(project_id), &request.reason),
    )
}

pub(crate) async fn issue_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Path(project_id): Path<String>,
    Json(request): Json<IssueRequest>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.issue_credits(&ProjectId(project_id), request.quantity),
    )
}

pub(crate) async fn price_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Path(project_id): Path<String>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.price_suggestion(&ProjectId(project_id)),
    )
}

pub(crate) async fn marketplace_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Query(filter): Query<MarketplaceFilter>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(StatusCode::OK, service.marketplace(&filter))
}

pub(crate) async fn purchase_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Json(request): Json<PurchaseRequest>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.purchase(
            &ProjectId(request.project_id),
            request.quantity,
            &request.buyer_id,
        ),
    )
}

pub(crate) async fn retire_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Json(request): Json<RetireRequest>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.retire(
            &ProjectId(request.project_id),
            request.quantity,
            &request.buyer_id,
            &request.reason,
        ),
    )
}

pub(crate) async fn ledger_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Query(query): Query<LedgerQuery>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(StatusCode::OK, service.ledger(query.page, query.page_size))
}

pub(crate) async fn admin_stats_handler<P, L>(State(service): SharedRegistry<P, L>) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(StatusCode::OK, service.admin_stats())
}

pub(crate) async fn portfolio_handler<P, L>(
    State(service): SharedRegistry<P, L>,
    Path(buyer_id): Path<String>,
) -> Response
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    respond(StatusCode::OK, service.buyer_portfolio(&buyer_id))
}
