use serde::{Deserialize, Serialize};

use super::domain::{CartItem, ProjectId};
use super::session::{SessionError, SessionStore};

pub const CART_SESSION_KEY: &str = "bcx_cart";

/// Marketplace cart. One line per project; repeated adds merge quantities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|line| line.project_id == item.project_id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
    }

    pub fn remove_item(&mut self, project_id: &ProjectId) {
        self.items.retain(|line| &line.project_id != project_id);
    }

    /// Set a line's quantity; zero or negative removes the line.
    pub fn update_quantity(&mut self, project_id: &ProjectId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(project_id);
            return;
        }

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| &line.project_id == project_id)
        {
            line.quantity = quantity as u64;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_items(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |total, line| total.saturating_add(line.quantity))
    }

    /// Cart value in INR, saturating at `u64::MAX`.
    pub fn total_value(&self) -> u64 {
        self.items.iter().fold(0u64, |total, line| {
            total.saturating_add(line.quantity.saturating_mul(u64::from(line.price_per_credit)))
        })
    }

    pub fn save<S: SessionStore + ?Sized>(&self, store: &S) -> Result<(), SessionError> {
        if self.items.is_empty() {
            store.clear(CART_SESSION_KEY);
            return Ok(());
        }
        store.set(CART_SESSION_KEY, serde_json::to_string(self)?);
        Ok(())
    }

    /// Load the stored cart; a missing entry is an empty cart.
    pub fn load<S: SessionStore + ?Sized>(store: &S) -> Result<Self, SessionError> {
        match store.get(CART_SESSION_KEY) {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Self::default()),
        }
    }
}
