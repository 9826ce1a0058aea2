use std::sync::Arc;

use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::assistant::{assistant_router, AssistantService, LatencyProfile};

fn router() -> axum::Router {
    assistant_router(Arc::new(AssistantService::new(LatencyProfile::disabled())))
}

fn post_json(uri: &str, payload: serde_json::Value) -> Request<axum::body::Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&payload).expect("serialize payload"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn validate_route_reports_issues() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/ai/validate",
            json!({ "sector": "Blue Carbon", "co2Reduction": 500 }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["isValid"], json!(false));
    assert_eq!(body["issues"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["suggestions"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["estimatedScore"], json!(70));
}

#[tokio::test]
async fn integrity_route_returns_camel_case_result() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/ai/integrity-score",
            json!({
                "projectId": "prj-9",
                "methodology": "VM0033",
                "co2Reduction": 50000,
                "vintage": 2024,
                "location": "Sundarbans",
                "sector": "Blue Carbon"
            }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["projectId"], json!("prj-9"));
    assert_eq!(body["integrityScore"], json!(98));
    assert_eq!(body["riskLevel"], json!("low"));
    assert_eq!(body["findings"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["recommendations"].as_array().map(Vec::len), Some(3));
    assert!(body["validatedAt"].is_string());
}

#[tokio::test]
async fn price_route_returns_range_pair() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/ai/price",
            json!({
                "sector": "Renewable Energy",
                "integrityScore": 90,
                "vintage": 2024,
                "sdgGoals": [7, 13]
            }),
        ))
        .await
        .expect("route responds");

    let body = read_json_body(response).await;
    assert_eq!(body["suggestedPrice"], json!(981));
    assert_eq!(body["priceRange"], json!([834, 1128]));
}

#[tokio::test]
async fn malformed_payload_is_rejected() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/ai/price",
            json!({ "sector": "Renewable Energy", "integrityScore": "high" }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(start_paused = true)]
async fn simulated_latency_delays_service_calls() {
    let service = AssistantService::new(LatencyProfile::simulated());
    let started = tokio::time::Instant::now();

    let verdict = service.validate(&complete_draft()).await;

    assert!(verdict.is_valid);
    assert!(started.elapsed() >= LatencyProfile::simulated().validate);
}
