//! Represents a purchase order and its line items.
//!
//! # Stores
//! Orders are owned by the [`OrderStore`](crate::order_service::OrderStore). Each order records,
//! per line, the status the inventory returned for its reservation, so that cancelling can
//! release exactly the reservations that succeeded.

use crate::model::{ProductId, StockStatus};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders. Allocated from 1 upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One requested line of a CreateOrder call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// The per-item answer to CreateOrder, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatus {
    pub product_id: ProductId,
    pub status: StockStatus,
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.product_id, self.status)
    }
}

/// A processed line: what was asked, what the inventory said, and whether it was given back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub status: StockStatus,
    pub released: bool,
}

impl OrderLine {
    pub fn new(item: OrderItem, status: StockStatus) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            status,
            released: false,
        }
    }

    /// A reservation that succeeded and has not been compensated yet.
    pub fn holds_reservation(&self) -> bool {
        self.status.is_success() && !self.released
    }

    pub fn item_status(&self) -> ItemStatus {
        ItemStatus {
            product_id: self.product_id,
            status: self.status,
        }
    }
}

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderState {
    /// Id allocated, lines still being reserved.
    #[default]
    Placeholder,
    /// Every line processed; the order can be cancelled.
    Open,
    /// Cancelled and removed from the store. A handle still held by a racing caller sees this.
    Closed,
}

/// The mutable contents of one order, guarded by that order's own lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRecord {
    pub state: OrderState,
    pub lines: Vec<OrderLine>,
}

impl OrderRecord {
    pub fn outcomes(&self) -> Vec<ItemStatus> {
        self.lines.iter().map(OrderLine::item_status).collect()
    }
}
