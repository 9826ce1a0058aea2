use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project sector. Labels outside the seven registry sectors are kept verbatim
/// so that the fallback scoring and pricing tables apply to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sector {
    RenewableEnergy,
    Afforestation,
    MethaneCapture,
    EnergyEfficiency,
    BlueCarbon,
    SoilCarbon,
    WasteManagement,
    Other(String),
}

impl Sector {
    pub const REGISTERED: [Sector; 7] = [
        Sector::RenewableEnergy,
        Sector::Afforestation,
        Sector::MethaneCapture,
        Sector::EnergyEfficiency,
        Sector::BlueCarbon,
        Sector::SoilCarbon,
        Sector::WasteManagement,
    ];

    pub fn label(&self) -> &str {
        match self {
            Sector::RenewableEnergy => "Renewable Energy",
            Sector::Afforestation => "Afforestation",
            Sector::MethaneCapture => "Methane Capture",
            Sector::EnergyEfficiency => "Energy Efficiency",
            Sector::BlueCarbon => "Blue Carbon",
            Sector::SoilCarbon => "Soil Carbon",
            Sector::WasteManagement => "Waste Management",
            Sector::Other(label) => label,
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::REGISTERED
            .into_iter()
            .find(|sector| sector.label() == raw)
            .unwrap_or_else(|| Sector::Other(raw.to_string()))
    }

    pub fn is_registered(&self) -> bool {
        !matches!(self, Sector::Other(_))
    }
}

impl From<String> for Sector {
    fn from(value: String) -> Self {
        Sector::parse(&value)
    }
}

impl From<Sector> for String {
    fn from(value: Sector) -> Self {
        match value {
            Sector::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl Default for Sector {
    fn default() -> Self {
        Sector::RenewableEnergy
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk tier derived from an integrity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= 85 {
            RiskLevel::Low
        } else if score >= 70 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Partially filled project registration, as submitted for pre-checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    #[serde(default)]
    pub name: Option<String>,
    pub sector: Sector,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub co2_reduction: Option<u64>,
    #[serde(default)]
    pub vintage: Option<i32>,
    #[serde(default)]
    pub sdg_goals: Option<Vec<u8>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub total_credits: Option<u64>,
    #[serde(default)]
    pub price_per_credit: Option<u32>,
    #[serde(default)]
    pub developer_id: Option<String>,
    #[serde(default)]
    pub developer_name: Option<String>,
}

/// Completeness verdict for a draft registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub estimated_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityScoreInput {
    pub project_id: String,
    pub methodology: String,
    pub co2_reduction: u64,
    pub vintage: i32,
    pub location: String,
    pub sector: Sector,
}

/// Integrity assessment with the narrative trail shown to reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityResult {
    pub project_id: String,
    pub integrity_score: u8,
    pub risk_level: RiskLevel,
    pub findings: [String; 4],
    pub recommendations: [String; 3],
    pub validated_at: DateTime<Utc>,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInput {
    pub sector: Sector,
    pub integrity_score: i32,
    pub vintage: i32,
    #[serde(default)]
    pub sdg_goals: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAdvice {
    pub suggested_price: i64,
    pub price_range: (i64, i64),
}
