//! Calls accepted by the order service.

use crate::model::{CancelStatus, ItemStatus, OrderId, OrderItem};
use serde::{Deserialize, Serialize};

/// Operations of the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderCall {
    /// Reserves every item against the inventory and records the order.
    ///
    /// Items are processed in submission order and independently: a failed item does not undo
    /// the items reserved before it.
    CreateOrder { items: Vec<OrderItem> },
    /// Releases the successful reservations of an order and forgets it.
    CancelOrder { order_id: OrderId },
    /// Shuts down the inventory service, then this one.
    Shutdown,
}

/// Replies from the order service.
///
/// Variants match 1:1 with OrderCall, plus `InventoryUnavailable` for a call that could not be
/// completed because the inventory service did not answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderReply {
    CreateOrder {
        order_id: OrderId,
        items: Vec<ItemStatus>,
    },
    CancelOrder(CancelStatus),
    Shutdown {
        total_products: usize,
        total_orders: usize,
    },
    InventoryUnavailable(String),
}
