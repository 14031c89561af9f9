//! # Order Store
//!
//! Owns the open orders and runs the reservation protocol against the inventory.
//!
//! The structural lock (`book`) guards id allocation and membership. Each order has its own
//! `Arc<Mutex<OrderRecord>>`, created when the id is allocated and reused by every later
//! operation on that order. Inventory calls are made only while holding the order's lock.
//!
//! A new order's lock is taken before the order is published, so anyone who finds the id in the
//! book waits until its lines are recorded. Cancelling takes the structural lock for removal
//! while still holding the order's lock; this is safe because nothing waits for a published
//! order's lock while holding the structural lock.

use super::error::InterruptedOrder;
use crate::clients::InventoryClient;
use crate::model::{
    CancelStatus, ItemStatus, OrderId, OrderItem, OrderLine, OrderRecord, OrderState,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

type OrderHandle = Arc<Mutex<OrderRecord>>;

#[derive(Debug)]
struct OrderBook {
    next_id: u32,
    orders: HashMap<OrderId, OrderHandle>,
}

/// The outcome of a completed CreateOrder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedOrder {
    pub order_id: OrderId,
    pub items: Vec<ItemStatus>,
}

/// The orders of one order service and its connection to the inventory.
#[derive(Debug)]
pub struct OrderStore {
    book: RwLock<OrderBook>,
    inventory: InventoryClient,
}

impl OrderStore {
    pub fn new(inventory: InventoryClient) -> Self {
        Self {
            book: RwLock::new(OrderBook {
                next_id: 1,
                orders: HashMap::new(),
            }),
            inventory,
        }
    }

    pub fn inventory(&self) -> &InventoryClient {
        &self.inventory
    }

    /// Allocates an order and reserves each item in submission order.
    ///
    /// Every item's inventory status is recorded verbatim, success or not; a failed item does
    /// not undo earlier ones. If the inventory cannot be reached, processing stops, the order
    /// keeps the lines handled so far and the failure is returned.
    pub async fn create_order(
        &self,
        items: Vec<OrderItem>,
    ) -> Result<CreatedOrder, InterruptedOrder> {
        let (order_id, mut record) = {
            let mut book = self.book.write().await;
            let order_id = OrderId(book.next_id);
            book.next_id += 1;
            let handle: OrderHandle = Arc::new(Mutex::new(OrderRecord::default()));
            // Unpublished, so this never waits.
            let record = handle.clone().lock_owned().await;
            book.orders.insert(order_id, handle);
            (order_id, record)
        };

        record.lines.reserve(items.len());
        for item in items {
            let delta = -i64::from(item.quantity);
            match self.inventory.change_quantity(item.product_id, delta).await {
                Ok(status) => {
                    if !status.is_success() {
                        warn!(order_id = %order_id, product_id = %item.product_id, quantity = item.quantity, %status, "Reservation failed");
                    }
                    record.lines.push(OrderLine::new(item, status));
                }
                Err(source) => {
                    record.state = OrderState::Open;
                    warn!(order_id = %order_id, error = %source, processed = record.lines.len(), "Inventory unreachable while reserving");
                    return Err(InterruptedOrder { order_id, source });
                }
            }
        }

        record.state = OrderState::Open;
        info!(order_id = %order_id, lines = record.lines.len(), "Order created");
        Ok(CreatedOrder {
            order_id,
            items: record.outcomes(),
        })
    }

    /// Releases every reservation the order still holds, then removes it.
    ///
    /// Unknown ids, and orders a concurrent caller has already cancelled, yield `UnknownOrder`.
    /// If the inventory cannot be reached the order stays open; lines already released are
    /// marked so that cancelling again only releases the rest.
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<CancelStatus, InterruptedOrder> {
        let handle = self.book.read().await.orders.get(&order_id).cloned();
        let Some(handle) = handle else {
            debug!(order_id = %order_id, "Unknown order");
            return Ok(CancelStatus::UnknownOrder);
        };

        let mut record = handle.lock().await;
        if record.state == OrderState::Closed {
            debug!(order_id = %order_id, "Order already cancelled");
            return Ok(CancelStatus::UnknownOrder);
        }

        for line in record.lines.iter_mut().filter(|line| line.holds_reservation()) {
            let delta = i64::from(line.quantity);
            match self.inventory.change_quantity(line.product_id, delta).await {
                Ok(status) => {
                    if !status.is_success() {
                        warn!(order_id = %order_id, product_id = %line.product_id, %status, "Release refused");
                    }
                    line.released = true;
                }
                Err(source) => {
                    warn!(order_id = %order_id, error = %source, "Inventory unreachable while releasing");
                    return Err(InterruptedOrder { order_id, source });
                }
            }
        }

        record.state = OrderState::Closed;
        self.book.write().await.orders.remove(&order_id);
        info!(order_id = %order_id, "Order cancelled");
        Ok(CancelStatus::Cancelled)
    }

    /// Number of orders not cancelled.
    pub async fn open_orders(&self) -> usize {
        self.book.read().await.orders.len()
    }
}
