//! Carbon-credit registry: project review, credit issuance, marketplace trades,
//! retirements, dashboard statistics, and the public ledger.

pub mod cart;
pub mod domain;
pub mod ledger;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;
mod stats;

#[cfg(test)]
mod tests;

pub use cart::Cart;
pub use domain::{
    AdminStats, BuyerPortfolio, CarbonProject, CartItem, Holding, IssuanceReceipt, LedgerPage,
    MarketplaceFilter, MonthlyVolume, ProjectFilter, ProjectId, ProjectStatus,
    RegistrationReceipt, Transaction, TransactionStatus, TransactionType, User, UserRole,
};
pub use ledger::write_csv;
pub use memory::{InMemoryLedger, InMemoryProjectRepository};
pub use repository::{LedgerRepository, ProjectRepository, RepositoryError};
pub use router::registry_router;
pub use service::{RegistryError, RegistryService};
pub use session::{
    AuthError, AuthSession, DemoCredential, MemorySessionStore, SessionError, SessionStore,
    UserDirectory,
};
