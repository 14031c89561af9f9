//! Error types for the order service and its clients.

use crate::inventory_service::InventoryError;
use crate::model::OrderId;
use thiserror::Error;

/// Errors that can occur while calling the order service.
///
/// Out-of-stock items, unknown products and unknown orders are not errors; they are reported
/// through [`StockStatus`](crate::model::StockStatus) and
/// [`CancelStatus`](crate::model::CancelStatus).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The call could not be delivered or its reply could not be read.
    #[error("Service communication error: {0}")]
    ServiceCommunicationError(String),

    /// The order service could not reach the inventory service.
    #[error("Inventory unavailable: {0}")]
    InventoryUnavailable(String),

    /// The service answered with a reply that does not belong to the call.
    #[error("Unexpected reply to {0}")]
    UnexpectedReply(&'static str),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ServiceCommunicationError(msg)
    }
}

impl From<InventoryError> for OrderError {
    fn from(e: InventoryError) -> Self {
        OrderError::InventoryUnavailable(e.to_string())
    }
}

/// An order whose inventory calls stopped partway because the inventory could not be reached.
///
/// The lines processed before the failure stay recorded under `order_id`, so cancelling the
/// order later releases exactly what was reserved or not yet released.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("order {order_id} interrupted: {source}")]
pub struct InterruptedOrder {
    pub order_id: OrderId,
    #[source]
    pub source: InventoryError,
}
