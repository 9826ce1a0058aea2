use chrono::{DateTime, Utc};

use super::domain::{IntegrityResult, IntegrityScoreInput, RiskLevel};
use super::tables::{group_indian, sector_base_score};

pub const INTEGRITY_MODEL: &str = "bcx-integrity-v1-mock (Genkit/VertexAI ready)";

pub(crate) const FRESH_VINTAGE_FROM: i32 = 2023;
pub(crate) const LARGE_SCALE_ABOVE: u64 = 200_000;

const VINTAGE_BONUS: i32 = 3;
const SCALE_PENALTY: i32 = -5;
const APPROVAL_THRESHOLD: u8 = 80;

/// Score a project's integrity, stamping the result with `validated_at`.
pub fn score_integrity(input: &IntegrityScoreInput, validated_at: DateTime<Utc>) -> IntegrityResult {
    let integrity_score = integrity_points(input);
    let risk_level = RiskLevel::from_score(integrity_score);

    IntegrityResult {
        project_id: input.project_id.clone(),
        integrity_score,
        risk_level,
        findings: findings(input, risk_level),
        recommendations: recommendations(integrity_score),
        validated_at,
        model: INTEGRITY_MODEL.to_string(),
    }
}

pub fn score_integrity_now(input: &IntegrityScoreInput) -> IntegrityResult {
    score_integrity(input, Utc::now())
}

fn integrity_points(input: &IntegrityScoreInput) -> u8 {
    let base = sector_base_score(&input.sector);
    let vintage_bonus = if input.vintage >= FRESH_VINTAGE_FROM {
        VINTAGE_BONUS
    } else {
        0
    };
    // Very large claims get extra scrutiny.
    let scale_risk = if input.co2_reduction > LARGE_SCALE_ABOVE {
        SCALE_PENALTY
    } else {
        0
    };

    (base + vintage_bonus + scale_risk).clamp(0, 100) as u8
}

fn findings(input: &IntegrityScoreInput, risk_level: RiskLevel) -> [String; 4] {
    let greenwashing = match risk_level {
        RiskLevel::High => {
            "⚠ Additional third-party verification recommended before credit issuance."
        }
        RiskLevel::Low | RiskLevel::Medium => "No major greenwashing indicators detected.",
    };

    [
        format!(
            "Methodology {} is recognized under BIS/MoEFCC framework.",
            input.methodology
        ),
        format!(
            "Location {} has verifiable land-use change records.",
            input.location
        ),
        format!(
            "CO₂ reduction of {} tCO₂e is within plausible range for sector.",
            group_indian(input.co2_reduction)
        ),
        greenwashing.to_string(),
    ]
}

fn recommendations(integrity_score: u8) -> [String; 3] {
    let next_step = if integrity_score < APPROVAL_THRESHOLD {
        "Consider co-registering with Gold Standard to improve credit market value."
    } else {
        "Project meets BCX quality threshold. Proceed to registry approval."
    };

    [
        "Submit satellite imagery baseline from 2019–2021 for permanence verification."
            .to_string(),
        "Ensure 3rd-party MRV audit is completed by an accredited agency (DNV, Bureau Veritas)."
            .to_string(),
        next_step.to_string(),
    ]
}
