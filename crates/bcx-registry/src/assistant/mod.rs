//! Integrity assistant: completeness checks, integrity scoring, and price advice.
//!
//! The rule functions are pure and synchronous. [`AssistantService`] wraps them for
//! async callers and is the only place response latency is simulated.

pub mod domain;
mod integrity;
mod pricing;
pub mod router;
mod service;
mod tables;
mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    IntegrityResult, IntegrityScoreInput, PriceAdvice, PriceInput, ProjectDraft, RiskLevel,
    Sector, ValidationVerdict,
};
pub use integrity::{score_integrity, score_integrity_now, INTEGRITY_MODEL};
pub use pricing::suggest_price;
pub use router::assistant_router;
pub use service::{AssistantService, LatencyProfile};
pub use validation::validate_project;
