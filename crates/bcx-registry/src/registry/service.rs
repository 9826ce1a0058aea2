use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Datelike, Utc};
use tracing::{error, info};

use super::cart::Cart;
use super::domain::{
    AdminStats, BuyerPortfolio, CarbonProject, IssuanceReceipt, LedgerPage, MarketplaceFilter,
    ProjectFilter, ProjectId, ProjectStatus, RegistrationReceipt, Transaction, TransactionStatus,
    TransactionType,
};
use super::ledger::newest_first;
use super::repository::{LedgerRepository, ProjectRepository, RepositoryError};
use super::stats;
use crate::assistant::{suggest_price, validate_project, PriceAdvice, PriceInput, ProjectDraft};

pub const REGISTRY_ACCOUNT: &str = "BCX Registry";
pub const RETIREMENT_ACCOUNT: &str = "Retired";

const MAX_SERIALS_PER_ISSUANCE: u64 = 5;
const FIRST_SERIAL: u64 = 1001;
const MAX_PAGE_SIZE: usize = 100;

/// Service composing the project registry, the ledger, and the completeness check.
pub struct RegistryService<P, L> {
    projects: Arc<P>,
    ledger: Arc<L>,
    project_sequence: AtomicU64,
    transaction_sequence: AtomicU64,
    // Serialises read-check-write sequences against the stores.
    writes: Mutex<()>,
}

impl<P, L> RegistryService<P, L>
where
    P: ProjectRepository + 'static,
    L: LedgerRepository + 'static,
{
    pub fn new(projects: Arc<P>, ledger: Arc<L>) -> Self {
        Self {
            projects,
            ledger,
            project_sequence: AtomicU64::new(1),
            transaction_sequence: AtomicU64::new(1),
            writes: Mutex::new(()),
        }
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().expect("registry write mutex poisoned")
    }

    /// Append `transaction`; if the ledger refuses it, put `previous` back in the store.
    fn record(
        &self,
        transaction: Transaction,
        previous: CarbonProject,
    ) -> Result<(), RegistryError> {
        if let Err(err) = self.ledger.append(transaction) {
            let project_id = previous.id.clone();
            if let Err(restore) = self.projects.update(previous) {
                error!(
                    project_id = %project_id,
                    error = %restore,
                    "project restore failed after ledger error"
                );
            }
            return Err(err.into());
        }
        Ok(())
    }

    fn next_project_id(&self) -> ProjectId {
        let id = self.project_sequence.fetch_add(1, Ordering::Relaxed);
        ProjectId(format!("prj-{id:06}"))
    }

    fn next_transaction_id(&self, prefix: &str) -> String {
        let id = self.transaction_sequence.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{id:06}")
    }

    /// Register a draft, storing it as pending with its pre-check score.
    pub fn register_project(
        &self,
        draft: ProjectDraft,
    ) -> Result<RegistrationReceipt, RegistryError> {
        let name = draft
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| RegistryError::InvalidProject("project name is required".to_string()))?
            .to_string();

        let verdict = validate_project(&draft);
        let vintage = draft
            .vintage
            .filter(|year| *year != 0)
            .unwrap_or_else(|| Utc::now().year());
        let sdg_goals = draft.sdg_goals.clone().unwrap_or_default();

        let price_per_credit = match draft.price_per_credit {
            Some(price) => price,
            None => {
                let advice = suggest_price(&PriceInput {
                    sector: draft.sector.clone(),
                    integrity_score: i32::from(verdict.estimated_score),
                    vintage,
                    sdg_goals: sdg_goals.clone(),
                });
                u32::try_from(advice.suggested_price.max(0)).unwrap_or(u32::MAX)
            }
        };

        let project = CarbonProject {
            id: self.next_project_id(),
            name,
            developer_id: draft.developer_id.unwrap_or_default(),
            developer_name: draft.developer_name.unwrap_or_default(),
            sector: draft.sector,
            location: draft.location.unwrap_or_default(),
            state: draft.state.unwrap_or_default(),
            vintage,
            total_credits: draft.total_credits.unwrap_or(0),
            issued_credits: 0,
            available_credits: 0,
            price_per_credit,
            status: ProjectStatus::Pending,
            integrity_score: verdict.estimated_score,
            methodology: draft.methodology.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            co2_reduction: draft.co2_reduction.unwrap_or(0),
            sdg_goals,
            created_at: Utc::now(),
            approved_at: None,
            rejection_reason: None,
        };

        let stored = self.projects.insert(project)?;
        info!(
            project_id = %stored.id.0,
            sector = %stored.sector,
            estimated_score = verdict.estimated_score,
            "project registered"
        );

        Ok(RegistrationReceipt {
            project_id: stored.id,
            status: stored.status,
            verdict,
        })
    }

    pub fn projects(&self, filter: &ProjectFilter) -> Result<Vec<CarbonProject>, RegistryError> {
        let projects = self.projects.list()?;
        Ok(projects
            .into_iter()
            .filter(|project| filter.matches(project))
            .collect())
    }

    pub fn project(&self, id: &ProjectId) -> Result<CarbonProject, RegistryError> {
        self.projects
            .fetch(id)?
            .ok_or_else(|| RegistryError::NotFound(id.clone()))
    }

    pub fn approve_project(&self, id: &ProjectId) -> Result<CarbonProject, RegistryError> {
        let _writes = self.lock_writes();
        let mut project = self.project(id)?;
        ensure_status(&project, ProjectStatus::Pending, "approve")?;

        project.status = ProjectStatus::Approved;
        project.approved_at = Some(Utc::now());
        self.projects.update(project.clone())?;

        info!(project_id = %id.0, "project approved");
        Ok(project)
    }

    pub fn reject_project(
        &self,
        id: &ProjectId,
        reason: &str,
    ) -> Result<CarbonProject, RegistryError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(RegistryError::InvalidProject(
                "rejection reason is required".to_string(),
            ));
        }

        let _writes = self.lock_writes();
        let mut project = self.project(id)?;
        ensure_status(&project, ProjectStatus::Pending, "reject")?;

        project.status = ProjectStatus::Rejected;
        project.rejection_reason = Some(reason.to_string());
        self.projects.update(project.clone())?;

        info!(project_id = %id.0, reason, "project rejected");
        Ok(project)
    }

    /// Issue credits against an approved project, activating it on the marketplace.
    pub fn issue_credits(
        &self,
        id: &ProjectId,
        quantity: u64,
    ) -> Result<IssuanceReceipt, RegistryError> {
        let _writes = self.lock_writes();
        let mut project = self.project(id)?;
        if !project.status.can_issue_credits() {
            return Err(RegistryError::InvalidTransition {
                project_id: id.clone(),
                status: project.status,
                action: "issue credits for",
            });
        }

        let remaining = project.total_credits.saturating_sub(project.issued_credits);
        let out_of_range = || RegistryError::InvalidQuantity {
            requested: quantity,
            available: remaining,
        };
        if quantity == 0 || quantity > remaining {
            return Err(out_of_range());
        }

        let serial_count = quantity.min(MAX_SERIALS_PER_ISSUANCE);
        let first_serial = FIRST_SERIAL
            .checked_add(project.issued_credits)
            .filter(|first| first.checked_add(serial_count).is_some())
            .ok_or_else(out_of_range)?;
        let available_credits = project
            .available_credits
            .checked_add(quantity)
            .ok_or_else(out_of_range)?;
        let serial_numbers = (0..serial_count)
            .map(|offset| {
                format!(
                    "BCX-{}-{}-{:04}",
                    id.0.to_uppercase(),
                    project.vintage,
                    first_serial + offset
                )
            })
            .collect();

        let previous = project.clone();
        project.issued_credits += quantity;
        project.available_credits = available_credits;
        project.status = ProjectStatus::Active;
        self.projects.update(project.clone())?;

        let issuance = Transaction {
            id: self.next_transaction_id("txn"),
            kind: TransactionType::Issuance,
            project_id: id.clone(),
            project_name: project.name.clone(),
            from: REGISTRY_ACCOUNT.to_string(),
            to: project.developer_name.clone(),
            quantity,
            price_per_credit: None,
            total_value: None,
            timestamp: Utc::now(),
            status: TransactionStatus::Confirmed,
        };
        self.record(issuance, previous)?;

        info!(project_id = %id.0, quantity, "credits issued");
        Ok(IssuanceReceipt {
            project_id: id.clone(),
            quantity,
            serial_numbers,
        })
    }

    pub fn marketplace(
        &self,
        filter: &MarketplaceFilter,
    ) -> Result<Vec<CarbonProject>, RegistryError> {
        let projects = self.projects.list()?;
        Ok(projects
            .into_iter()
            .filter(|project| filter.matches(project))
            .collect())
    }

    pub fn purchase(
        &self,
        id: &ProjectId,
        quantity: u64,
        buyer_id: &str,
    ) -> Result<Transaction, RegistryError> {
        let _writes = self.lock_writes();
        let mut project = self.project(id)?;
        ensure_status(&project, ProjectStatus::Active, "purchase from")?;

        let available = project.available_credits;
        let out_of_range = || RegistryError::InvalidQuantity {
            requested: quantity,
            available,
        };
        if quantity == 0 || quantity > available {
            return Err(out_of_range());
        }
        let total_value = quantity
            .checked_mul(u64::from(project.price_per_credit))
            .ok_or_else(out_of_range)?;

        let previous = project.clone();
        project.available_credits -= quantity;
        self.projects.update(project.clone())?;

        let transaction = Transaction {
            id: self.next_transaction_id("txn"),
            kind: TransactionType::Purchase,
            project_id: id.clone(),
            project_name: project.name.clone(),
            from: project.developer_name.clone(),
            to: buyer_id.to_string(),
            quantity,
            price_per_credit: Some(project.price_per_credit),
            total_value: Some(total_value),
            timestamp: Utc::now(),
            status: TransactionStatus::Confirmed,
        };
        self.record(transaction.clone(), previous)?;

        info!(project_id = %id.0, quantity, buyer_id, "credits purchased");
        Ok(transaction)
    }

    /// Purchase every cart line in order. Purchased lines leave the cart; the first
    /// failure stops checkout and leaves the remaining lines in place.
    pub fn checkout(
        &self,
        cart: &mut Cart,
        buyer_id: &str,
    ) -> Result<Vec<Transaction>, RegistryError> {
        let mut transactions = Vec::new();
        while let Some(item) = cart.items().first().cloned() {
            let transaction = self.purchase(&item.project_id, item.quantity, buyer_id)?;
            cart.remove_item(&item.project_id);
            transactions.push(transaction);
        }
        Ok(transactions)
    }

    pub fn retire(
        &self,
        id: &ProjectId,
        quantity: u64,
        buyer_id: &str,
        reason: &str,
    ) -> Result<Transaction, RegistryError> {
        if quantity == 0 {
            return Err(RegistryError::InvalidQuantity {
                requested: quantity,
                available: 0,
            });
        }
        let _writes = self.lock_writes();
        let project = self.project(id)?;
        ensure_status(&project, ProjectStatus::Active, "retire credits from")?;

        let held = stats::net_holding(buyer_id, id, &self.ledger.all()?);
        if quantity > held {
            return Err(RegistryError::InvalidQuantity {
                requested: quantity,
                available: held,
            });
        }

        let transaction = Transaction {
            id: self.next_transaction_id("RET"),
            kind: TransactionType::Retirement,
            project_id: id.clone(),
            project_name: project.name,
            from: buyer_id.to_string(),
            to: RETIREMENT_ACCOUNT.to_string(),
            quantity,
            price_per_credit: None,
            total_value: None,
            timestamp: Utc::now(),
            status: TransactionStatus::Confirmed,
        };
        self.ledger.append(transaction.clone())?;

        info!(project_id = %id.0, quantity, buyer_id, reason, "credits retired");
        Ok(transaction)
    }

    /// Newest-first ledger page. `page` is 1-based.
    pub fn ledger(&self, page: usize, page_size: usize) -> Result<LedgerPage, RegistryError> {
        let mut transactions = self.ledger.all()?;
        newest_first(&mut transactions);

        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let total = transactions.len();
        let transactions = transactions
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        Ok(LedgerPage {
            transactions,
            total,
            page,
            page_size,
        })
    }

    pub fn admin_stats(&self) -> Result<AdminStats, RegistryError> {
        let projects = self.projects.list()?;
        let transactions = self.ledger.all()?;
        Ok(stats::admin_stats(&projects, &transactions))
    }

    pub fn buyer_portfolio(&self, buyer_id: &str) -> Result<BuyerPortfolio, RegistryError> {
        let projects = self.projects.list()?;
        let transactions = self.ledger.all()?;
        Ok(stats::buyer_portfolio(buyer_id, &projects, &transactions))
    }

    pub fn price_suggestion(&self, id: &ProjectId) -> Result<PriceAdvice, RegistryError> {
        let project = self.project(id)?;
        Ok(suggest_price(&PriceInput {
            sector: project.sector,
            integrity_score: i32::from(project.integrity_score),
            vintage: project.vintage,
            sdg_goals: project.sdg_goals,
        }))
    }
}

fn ensure_status(
    project: &CarbonProject,
    expected: ProjectStatus,
    action: &'static str,
) -> Result<(), RegistryError> {
    if project.status == expected {
        Ok(())
    } else {
        Err(RegistryError::InvalidTransition {
            project_id: project.id.clone(),
            status: project.status,
            action,
        })
    }
}

/// Error raised by the registry service.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("project {0} not found")]
    NotFound(ProjectId),
    #[error("invalid project: {0}")]
    InvalidProject(String),
    #[error("cannot {action} project {project_id} while it is {status}")]
    InvalidTransition {
        project_id: ProjectId,
        status: ProjectStatus,
        action: &'static str,
    },
    #[error("invalid quantity {requested} (available {available})")]
    InvalidQuantity { requested: u64, available: u64 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
