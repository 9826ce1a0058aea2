use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::assistant::domain::{IntegrityScoreInput, PriceInput, ProjectDraft, Sector};

pub(super) fn complete_draft() -> ProjectDraft {
    ProjectDraft {
        name: Some("Rajasthan Wind Power Initiative".to_string()),
        sector: Sector::RenewableEnergy,
        methodology: Some("ACM0002".to_string()),
        co2_reduction: Some(180_000),
        vintage: Some(2024),
        sdg_goals: Some(vec![7, 13]),
        location: Some("Jaisalmer, Rajasthan".to_string()),
        ..ProjectDraft::default()
    }
}

pub(super) fn bare_draft(sector: Sector) -> ProjectDraft {
    ProjectDraft {
        sector,
        ..ProjectDraft::default()
    }
}

pub(super) fn integrity_input(sector: Sector, vintage: i32, co2_reduction: u64) -> IntegrityScoreInput {
    IntegrityScoreInput {
        project_id: "demo-001".to_string(),
        methodology: "VM0033".to_string(),
        co2_reduction,
        vintage,
        location: "Sundarbans, West Bengal".to_string(),
        sector,
    }
}

pub(super) fn price_input(sector: Sector, integrity_score: i32, vintage: i32, sdg_goals: Vec<u8>) -> PriceInput {
    PriceInput {
        sector,
        integrity_score,
        vintage,
        sdg_goals,
    }
}

pub(super) fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid instant")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
