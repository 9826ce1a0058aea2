use std::time::Duration;

use tracing::{debug, info};

use super::domain::{
    IntegrityResult, IntegrityScoreInput, PriceAdvice, PriceInput, ProjectDraft,
    ValidationVerdict,
};
use super::integrity::score_integrity_now;
use super::pricing::suggest_price;
use super::validation::validate_project;

/// Artificial response delays used to mimic a remote model in demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub validate: Duration,
    pub integrity: Duration,
    pub pricing: Duration,
}

impl LatencyProfile {
    pub const fn disabled() -> Self {
        Self {
            validate: Duration::ZERO,
            integrity: Duration::ZERO,
            pricing: Duration::ZERO,
        }
    }

    pub const fn simulated() -> Self {
        Self {
            validate: Duration::from_millis(1200),
            integrity: Duration::from_millis(1500),
            pricing: Duration::from_millis(800),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.validate.is_zero() && self.integrity.is_zero() && self.pricing.is_zero()
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Async front for the scoring rules, injecting latency only when configured.
#[derive(Debug, Clone, Default)]
pub struct AssistantService {
    latency: LatencyProfile,
}

impl AssistantService {
    pub fn new(latency: LatencyProfile) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> LatencyProfile {
        self.latency
    }

    pub async fn validate(&self, project: &ProjectDraft) -> ValidationVerdict {
        pause(self.latency.validate).await;
        let verdict = validate_project(project);
        info!(
            sector = %project.sector,
            is_valid = verdict.is_valid,
            issues = verdict.issues.len(),
            estimated_score = verdict.estimated_score,
            "project draft validated"
        );
        verdict
    }

    pub async fn integrity_score(&self, input: &IntegrityScoreInput) -> IntegrityResult {
        pause(self.latency.integrity).await;
        let result = score_integrity_now(input);
        info!(
            project_id = %result.project_id,
            integrity_score = result.integrity_score,
            risk_level = result.risk_level.label(),
            "integrity score computed"
        );
        result
    }

    pub async fn suggest_price(&self, input: &PriceInput) -> PriceAdvice {
        pause(self.latency.pricing).await;
        let advice = suggest_price(input);
        info!(
            sector = %input.sector,
            suggested_price = advice.suggested_price,
            "price suggestion computed"
        );
        advice
    }
}

async fn pause(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    debug!(delay_ms = delay.as_millis() as u64, "simulating assistant latency");
    tokio::time::sleep(delay).await;
}
