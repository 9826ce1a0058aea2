use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::domain::{CarbonProject, ProjectId, Transaction};
use super::repository::{LedgerRepository, ProjectRepository, RepositoryError};

/// Process-local project store, ordered by project id.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    records: Arc<Mutex<BTreeMap<ProjectId, CarbonProject>>>,
}

impl InMemoryProjectRepository {
    pub fn with_projects(projects: impl IntoIterator<Item = CarbonProject>) -> Self {
        let records = projects
            .into_iter()
            .map(|project| (project.id.clone(), project))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl ProjectRepository for InMemoryProjectRepository {
    fn insert(&self, project: CarbonProject) -> Result<CarbonProject, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&project.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    fn update(&self, project: CarbonProject) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&project.id) {
            Some(slot) => {
                *slot = project;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ProjectId) -> Result<Option<CarbonProject>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<CarbonProject>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    transactions: Arc<Mutex<Vec<Transaction>>>,
}

impl InMemoryLedger {
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(transactions)),
        }
    }
}

impl LedgerRepository for InMemoryLedger {
    fn append(&self, transaction: Transaction) -> Result<(), RepositoryError> {
        self.transactions
            .lock()
            .expect("ledger mutex poisoned")
            .push(transaction);
        Ok(())
    }

    fn all(&self) -> Result<Vec<Transaction>, RepositoryError> {
        Ok(self
            .transactions
            .lock()
            .expect("ledger mutex poisoned")
            .clone())
    }
}
