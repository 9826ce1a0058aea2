use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assistant::Sector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Developer,
    Buyer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registry lifecycle of a carbon project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Active,
}

impl ProjectStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Pending => "pending",
            ProjectStatus::Approved => "approved",
            ProjectStatus::Rejected => "rejected",
            ProjectStatus::Active => "active",
        }
    }

    pub const fn can_issue_credits(self) -> bool {
        matches!(self, ProjectStatus::Approved | ProjectStatus::Active)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonProject {
    pub id: ProjectId,
    pub name: String,
    pub developer_id: String,
    pub developer_name: String,
    pub sector: Sector,
    pub location: String,
    pub state: String,
    pub vintage: i32,
    pub total_credits: u64,
    /// Credits issued to date; never exceeds `total_credits`.
    #[serde(default)]
    pub issued_credits: u64,
    pub available_credits: u64,
    /// INR per credit.
    pub price_per_credit: u32,
    pub status: ProjectStatus,
    pub integrity_score: u8,
    pub methodology: String,
    pub description: String,
    /// Tonnes CO₂e.
    pub co2_reduction: u64,
    pub sdg_goals: Vec<u8>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Issuance,
    Transfer,
    Retirement,
    Purchase,
}

impl TransactionType {
    pub const fn label(self) -> &'static str {
        match self {
            TransactionType::Issuance => "issuance",
            TransactionType::Transfer => "transfer",
            TransactionType::Retirement => "retirement",
            TransactionType::Purchase => "purchase",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Confirmed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
        }
    }
}

/// Ledger entry recording a movement of credits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub project_id: ProjectId,
    pub project_name: String,
    pub from: String,
    pub to: String,
    pub quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_credit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<u64>,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub project_id: ProjectId,
    pub project_name: String,
    pub quantity: u64,
    pub price_per_credit: u32,
}

/// Conjunctive filter for registry listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFilter {
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub developer_id: Option<String>,
    #[serde(default)]
    pub sector: Option<Sector>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &CarbonProject) -> bool {
        self.status.map_or(true, |status| project.status == status)
            && self
                .developer_id
                .as_ref()
                .map_or(true, |developer| &project.developer_id == developer)
            && self
                .sector
                .as_ref()
                .map_or(true, |sector| &project.sector == sector)
    }
}

/// Marketplace filter; listings are always restricted to active projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceFilter {
    #[serde(default)]
    pub sector: Option<Sector>,
    #[serde(default)]
    pub min_price: Option<u32>,
    #[serde(default)]
    pub max_price: Option<u32>,
    #[serde(default)]
    pub min_score: Option<u8>,
}

impl MarketplaceFilter {
    pub fn matches(&self, project: &CarbonProject) -> bool {
        project.status == ProjectStatus::Active
            && self
                .sector
                .as_ref()
                .map_or(true, |sector| &project.sector == sector)
            && self
                .min_price
                .map_or(true, |min| project.price_per_credit >= min)
            && self
                .max_price
                .map_or(true, |max| project.price_per_credit <= max)
            && self
                .min_score
                .map_or(true, |min| project.integrity_score >= min)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerPage {
    pub transactions: Vec<Transaction>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Result of a project registration, carrying the pre-check verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub project_id: ProjectId,
    pub status: ProjectStatus,
    pub verdict: crate::assistant::ValidationVerdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuanceReceipt {
    pub project_id: ProjectId,
    pub quantity: u64,
    pub serial_numbers: Vec<String>,
}

/// Credits and value traded in one calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyVolume {
    pub month: String,
    pub volume: u64,
    pub value: u64,
}

/// Registry-wide totals for the admin dashboard, derived from the ledger and project store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_credits_issued: u64,
    pub total_credits_traded: u64,
    pub total_credits_retired: u64,
    pub pending_approvals: usize,
    pub active_projects: usize,
    /// Distinct developers with at least one registered project.
    pub registered_developers: usize,
    /// Distinct accounts with at least one purchase.
    pub registered_buyers: usize,
    pub monthly_volume: Vec<MonthlyVolume>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub project_id: ProjectId,
    pub project_name: String,
    pub sector: Sector,
    pub quantity: u64,
    pub avg_price: u64,
    pub current_price: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased_at: Option<DateTime<Utc>>,
}

/// A buyer's credits, spend, and retirements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerPortfolio {
    pub total_credits_owned: u64,
    pub total_credits_retired: u64,
    pub total_spent: u64,
    /// Tonnes CO₂e covered by credits held or retired.
    pub carbon_offset: u64,
    pub holdings: Vec<Holding>,
}
