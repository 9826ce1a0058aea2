use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use bcx_registry::assistant::Sector;
use bcx_registry::registry::{
    CarbonProject, DemoCredential, InMemoryLedger, InMemoryProjectRepository, ProjectId,
    ProjectStatus, RegistryService, Transaction, TransactionStatus, TransactionType, User,
    UserDirectory, UserRole,
};
use chrono::{DateTime, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

pub(crate) type SeededRegistry = RegistryService<InMemoryProjectRepository, InMemoryLedger>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Registry service preloaded with the demo marketplace.
pub(crate) fn seeded_registry() -> SeededRegistry {
    let projects = InMemoryProjectRepository::with_projects(seed_projects());
    let ledger = InMemoryLedger::with_transactions(seed_transactions());
    RegistryService::new(Arc::new(projects), Arc::new(ledger))
}

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 30, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

struct Seed {
    id: &'static str,
    name: &'static str,
    developer: (&'static str, &'static str),
    sector: Sector,
    place: (&'static str, &'static str),
    vintage: i32,
    credits: (u64, u64),
    price_per_credit: u32,
    status: ProjectStatus,
    integrity_score: u8,
    methodology: &'static str,
    co2_reduction: u64,
    sdg_goals: &'static [u8],
}

impl Seed {
    fn into_project(self) -> CarbonProject {
        let created_at = at(self.vintage, 2, 14);
        let approved = self.status != ProjectStatus::Pending;
        CarbonProject {
            id: ProjectId(self.id.to_string()),
            name: self.name.to_string(),
            developer_id: self.developer.0.to_string(),
            developer_name: self.developer.1.to_string(),
            sector: self.sector,
            location: self.place.0.to_string(),
            state: self.place.1.to_string(),
            vintage: self.vintage,
            total_credits: self.credits.0,
            issued_credits: if approved { self.credits.0 } else { 0 },
            available_credits: self.credits.1,
            price_per_credit: self.price_per_credit,
            status: self.status,
            integrity_score: self.integrity_score,
            methodology: self.methodology.to_string(),
            description: format!("{} in {}", self.name, self.place.1),
            co2_reduction: self.co2_reduction,
            sdg_goals: self.sdg_goals.to_vec(),
            created_at,
            approved_at: approved.then(|| at(self.vintage, 4, 1)),
            rejection_reason: None,
        }
    }
}

pub(crate) fn seed_projects() -> Vec<CarbonProject> {
    vec![
        Seed {
            id: "prj-sundarbans",
            name: "Sundarbans Mangrove Restoration",
            developer: ("dev-001", "Coastal Carbon Pvt Ltd"),
            sector: Sector::BlueCarbon,
            place: ("Sundarbans", "West Bengal"),
            vintage: 2024,
            credits: (40_000, 18_500),
            price_per_credit: 1_180,
            status: ProjectStatus::Active,
            integrity_score: 96,
            methodology: "VM0033",
            co2_reduction: 85_000,
            sdg_goals: &[13, 14, 15],
        }
        .into_project(),
        Seed {
            id: "prj-jaisalmer-wind",
            name: "Jaisalmer Wind Power Initiative",
            developer: ("dev-002", "GreenGrid Energy"),
            sector: Sector::RenewableEnergy,
            place: ("Jaisalmer", "Rajasthan"),
            vintage: 2023,
            credits: (120_000, 64_000),
            price_per_credit: 860,
            status: ProjectStatus::Active,
            integrity_score: 91,
            methodology: "ACM0002",
            co2_reduction: 240_000,
            sdg_goals: &[7, 13],
        }
        .into_project(),
        Seed {
            id: "prj-pune-biogas",
            name: "Pune Municipal Biogas Capture",
            developer: ("dev-003", "Urban Methane Solutions"),
            sector: Sector::MethaneCapture,
            place: ("Pune", "Maharashtra"),
            vintage: 2022,
            credits: (30_000, 12_000),
            price_per_credit: 910,
            status: ProjectStatus::Active,
            integrity_score: 80,
            methodology: "AMS-III.D",
            co2_reduction: 55_000,
            sdg_goals: &[6, 11, 13],
        }
        .into_project(),
        Seed {
            id: "prj-khasi-agroforestry",
            name: "Khasi Hills Agroforestry",
            developer: ("dev-001", "Coastal Carbon Pvt Ltd"),
            sector: Sector::Afforestation,
            place: ("East Khasi Hills", "Meghalaya"),
            vintage: 2024,
            credits: (25_000, 0),
            price_per_credit: 700,
            status: ProjectStatus::Pending,
            integrity_score: 85,
            methodology: "AR-ACM0003",
            co2_reduction: 32_000,
            sdg_goals: &[1, 13, 15],
        }
        .into_project(),
    ]
}

fn seed_transaction(
    id: &str,
    kind: TransactionType,
    project: (&str, &str),
    parties: (&str, &str),
    quantity: u64,
    price_per_credit: Option<u32>,
    timestamp: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        project_id: ProjectId(project.0.to_string()),
        project_name: project.1.to_string(),
        from: parties.0.to_string(),
        to: parties.1.to_string(),
        quantity,
        price_per_credit,
        total_value: price_per_credit.map(|price| quantity * u64::from(price)),
        timestamp,
        status: TransactionStatus::Confirmed,
    }
}

pub(crate) fn seed_transactions() -> Vec<Transaction> {
    let sundarbans = ("prj-sundarbans", "Sundarbans Mangrove Restoration");
    let jaisalmer = ("prj-jaisalmer-wind", "Jaisalmer Wind Power Initiative");
    let pune = ("prj-pune-biogas", "Pune Municipal Biogas Capture");

    vec![
        seed_transaction(
            "txn-seed-0001",
            TransactionType::Issuance,
            jaisalmer,
            ("BCX Registry", "GreenGrid Energy"),
            120_000,
            None,
            at(2024, 4, 2),
        ),
        seed_transaction(
            "txn-seed-0002",
            TransactionType::Issuance,
            pune,
            ("BCX Registry", "Urban Methane Solutions"),
            30_000,
            None,
            at(2024, 5, 10),
        ),
        seed_transaction(
            "txn-seed-0003",
            TransactionType::Purchase,
            jaisalmer,
            ("GreenGrid Energy", "buyer-001"),
            56_000,
            Some(860),
            at(2024, 7, 18),
        ),
        seed_transaction(
            "txn-seed-0004",
            TransactionType::Issuance,
            sundarbans,
            ("BCX Registry", "Coastal Carbon Pvt Ltd"),
            40_000,
            None,
            at(2024, 9, 1),
        ),
        seed_transaction(
            "txn-seed-0005",
            TransactionType::Purchase,
            sundarbans,
            ("Coastal Carbon Pvt Ltd", "buyer-001"),
            21_500,
            Some(1_180),
            at(2024, 11, 20),
        ),
        seed_transaction(
            "RET-seed-0006",
            TransactionType::Retirement,
            jaisalmer,
            ("buyer-001", "Retired"),
            10_000,
            None,
            at(2025, 3, 31),
        ),
    ]
}

/// Mock sign-in directory for the demo walk-through.
pub(crate) fn demo_directory() -> UserDirectory {
    let users = vec![
        demo_user("admin-001", "Registry Admin", "admin@bcx.in", UserRole::Admin, None),
        demo_user(
            "dev-001",
            "Priya Nair",
            "developer@bcx.in",
            UserRole::Developer,
            Some("Coastal Carbon Pvt Ltd"),
        ),
        demo_user(
            "buyer-001",
            "Asha Menon",
            "buyer@bcx.in",
            UserRole::Buyer,
            Some("Tata Steel"),
        ),
    ];
    let credentials = [
        ("admin@bcx.in", "admin123"),
        ("developer@bcx.in", "dev123"),
        ("buyer@bcx.in", "buyer123"),
    ]
    .into_iter()
    .map(|(email, password)| DemoCredential {
        email: email.to_string(),
        password: password.to_string(),
    })
    .collect();

    UserDirectory::new(credentials, users)
}

fn demo_user(
    id: &str,
    name: &str,
    email: &str,
    role: UserRole,
    organization: Option<&str>,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        organization: organization.map(str::to_string),
        created_at: at(2024, 1, 5),
    }
}
