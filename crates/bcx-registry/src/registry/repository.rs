use super::domain::{CarbonProject, ProjectId, Transaction};

/// Storage abstraction for registered projects.
pub trait ProjectRepository: Send + Sync {
    fn insert(&self, project: CarbonProject) -> Result<CarbonProject, RepositoryError>;
    fn update(&self, project: CarbonProject) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProjectId) -> Result<Option<CarbonProject>, RepositoryError>;
    fn list(&self) -> Result<Vec<CarbonProject>, RepositoryError>;
}

/// Append-only store for ledger transactions.
pub trait LedgerRepository: Send + Sync {
    fn append(&self, transaction: Transaction) -> Result<(), RepositoryError>;
    fn all(&self) -> Result<Vec<Transaction>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
