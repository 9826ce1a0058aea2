use super::domain::{ProjectDraft, Sector, ValidationVerdict};

pub(crate) const MINIMUM_CO2_REDUCTION: u64 = 1000;
pub(crate) const STALE_VINTAGE_BEFORE: i32 = 2020;

const ISSUE_METHODOLOGY: &str = "Methodology not specified.";
const ISSUE_LOW_REDUCTION: &str = "CO₂ reduction estimate appears too low for the project scale.";
const ISSUE_STALE_VINTAGE: &str =
    "Vintage year is older than 5 years — may face market discount.";
const SUGGEST_SDG_MAPPING: &str = "Map project to relevant UN SDG goals to improve market appeal.";
const SUGGEST_BLUE_CARBON: &str =
    "Blue carbon projects have premium pricing. Consider Verra VCS + CCBS dual certification.";

/// Pre-submission completeness check. Every rule runs; findings keep rule order.
pub fn validate_project(project: &ProjectDraft) -> ValidationVerdict {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    let methodology_missing = project
        .methodology
        .as_deref()
        .map(str::is_empty)
        .unwrap_or(true);
    if methodology_missing {
        issues.push(ISSUE_METHODOLOGY.to_string());
    }

    // Zero counts as unspecified.
    let reduction_too_low = project
        .co2_reduction
        .map(|tonnes| tonnes < MINIMUM_CO2_REDUCTION)
        .unwrap_or(true);
    if reduction_too_low {
        issues.push(ISSUE_LOW_REDUCTION.to_string());
    }

    let sdg_unmapped = project
        .sdg_goals
        .as_ref()
        .map(Vec::is_empty)
        .unwrap_or(true);
    if sdg_unmapped {
        suggestions.push(SUGGEST_SDG_MAPPING.to_string());
    }

    if let Some(vintage) = project.vintage.filter(|year| *year != 0) {
        if vintage < STALE_VINTAGE_BEFORE {
            issues.push(ISSUE_STALE_VINTAGE.to_string());
        }
    }

    if project.sector == Sector::BlueCarbon {
        suggestions.push(SUGGEST_BLUE_CARBON.to_string());
    }

    let estimated_score = estimated_score(issues.len(), suggestions.len());

    ValidationVerdict {
        is_valid: issues.is_empty(),
        issues,
        suggestions,
        estimated_score,
    }
}

fn estimated_score(issue_count: usize, suggestion_count: usize) -> u8 {
    let issue_penalty = (issue_count as i64).saturating_mul(15);
    let suggestion_penalty = if suggestion_count > 2 { 5 } else { 0 };
    (100 - issue_penalty - suggestion_penalty).clamp(40, 100) as u8
}
