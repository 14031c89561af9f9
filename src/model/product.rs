//! Represents a product in the inventory.
//!
//! # Stores
//! Products are owned by the [`InventoryStore`](crate::inventory_service::InventoryStore) and
//! never leave it; callers see [`ProductListing`] snapshots instead.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products. Allocated from 1 upward and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of a product listing, read under the inventory's structural lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListing {
    pub id: ProductId,
    pub quantity: i64,
    pub description: String,
}

impl Display for ProductListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.id, self.quantity, self.description)
    }
}
