use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::assistant::{ProjectDraft, Sector};
use crate::registry::domain::{
    CarbonProject, ProjectId, ProjectStatus, Transaction, TransactionStatus, TransactionType,
    User, UserRole,
};
use crate::registry::memory::{InMemoryLedger, InMemoryProjectRepository};
use crate::registry::repository::{LedgerRepository, ProjectRepository, RepositoryError};
use crate::registry::service::RegistryService;
use crate::registry::session::{DemoCredential, UserDirectory};

pub(super) type MemoryRegistry = RegistryService<InMemoryProjectRepository, InMemoryLedger>;

pub(super) fn build_service() -> (MemoryRegistry, InMemoryProjectRepository, InMemoryLedger) {
    let projects = InMemoryProjectRepository::default();
    let ledger = InMemoryLedger::default();
    let service = RegistryService::new(Arc::new(projects.clone()), Arc::new(ledger.clone()));
    (service, projects, ledger)
}

pub(super) fn draft() -> ProjectDraft {
    ProjectDraft {
        name: Some("Sundarbans Mangrove Restoration".to_string()),
        sector: Sector::BlueCarbon,
        methodology: Some("VM0033".to_string()),
        co2_reduction: Some(85_000),
        vintage: Some(2024),
        sdg_goals: Some(vec![13, 14, 15]),
        location: Some("Sundarbans".to_string()),
        state: Some("West Bengal".to_string()),
        description: Some("Mangrove replanting across degraded tidal flats".to_string()),
        total_credits: Some(50_000),
        price_per_credit: Some(1200),
        developer_id: Some("dev-001".to_string()),
        developer_name: Some("Coastal Carbon Pvt Ltd".to_string()),
    }
}

pub(super) fn active_project(id: &str, sector: Sector, price: u32, score: u8) -> CarbonProject {
    CarbonProject {
        id: ProjectId(id.to_string()),
        name: format!("Project {id}"),
        developer_id: "dev-002".to_string(),
        developer_name: "GreenGrid Energy".to_string(),
        sector,
        location: "Jaisalmer".to_string(),
        state: "Rajasthan".to_string(),
        vintage: 2023,
        total_credits: 10_000,
        issued_credits: 10_000,
        available_credits: 4_000,
        price_per_credit: price,
        status: ProjectStatus::Active,
        integrity_score: score,
        methodology: "ACM0002".to_string(),
        description: String::new(),
        co2_reduction: 120_000,
        sdg_goals: vec![7, 13],
        created_at: Utc::now(),
        approved_at: Some(Utc::now()),
        rejection_reason: None,
    }
}

pub(super) fn transaction_at(id: &str, day: u32) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind: TransactionType::Purchase,
        project_id: ProjectId("prj-000001".to_string()),
        project_name: "Project prj-000001".to_string(),
        from: "GreenGrid Energy".to_string(),
        to: "buyer-001".to_string(),
        quantity: 10,
        price_per_credit: Some(800),
        total_value: Some(8000),
        timestamp: Utc
            .with_ymd_and_hms(2024, 6, day, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
        status: TransactionStatus::Confirmed,
    }
}

pub(super) fn buyer() -> User {
    User {
        id: "buyer-001".to_string(),
        name: "Asha Menon".to_string(),
        email: "buyer@bcx.in".to_string(),
        role: UserRole::Buyer,
        organization: Some("Tata Steel".to_string()),
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 5, 0, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn directory() -> UserDirectory {
    UserDirectory::new(
        vec![
            DemoCredential {
                email: "buyer@bcx.in".to_string(),
                password: "buyer123".to_string(),
            },
            DemoCredential {
                email: "ghost@bcx.in".to_string(),
                password: "ghost123".to_string(),
            },
        ],
        vec![buyer()],
    )
}

pub(super) struct UnavailableProjects;

impl ProjectRepository for UnavailableProjects {
    fn insert(&self, _project: CarbonProject) -> Result<CarbonProject, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _project: CarbonProject) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ProjectId) -> Result<Option<CarbonProject>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<CarbonProject>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct RefusingLedger;

impl LedgerRepository for RefusingLedger {
    fn append(&self, _transaction: Transaction) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("ledger offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Transaction>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Project store whose reads take a while, widening any check-then-write window.
pub(super) struct SlowProjects {
    pub(super) inner: InMemoryProjectRepository,
    pub(super) delay: Duration,
}

impl ProjectRepository for SlowProjects {
    fn insert(&self, project: CarbonProject) -> Result<CarbonProject, RepositoryError> {
        self.inner.insert(project)
    }

    fn update(&self, project: CarbonProject) -> Result<(), RepositoryError> {
        self.inner.update(project)
    }

    fn fetch(&self, id: &ProjectId) -> Result<Option<CarbonProject>, RepositoryError> {
        std::thread::sleep(self.delay);
        self.inner.fetch(id)
    }

    fn list(&self) -> Result<Vec<CarbonProject>, RepositoryError> {
        self.inner.list()
    }
}

pub(super) fn ledger_len(ledger: &InMemoryLedger) -> usize {
    ledger.all().expect("ledger readable").len()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
