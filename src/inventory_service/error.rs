//! Error types for the inventory service clients.

use thiserror::Error;

/// Errors that can occur while calling the inventory service.
///
/// Business outcomes (unknown product, insufficient stock) are not errors; they come back as
/// [`StockStatus`](crate::model::StockStatus) values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// The call could not be delivered or its reply could not be read.
    #[error("Service communication error: {0}")]
    ServiceCommunicationError(String),

    /// The service answered with a reply that does not belong to the call.
    #[error("Unexpected reply to {0}")]
    UnexpectedReply(&'static str),
}

impl From<String> for InventoryError {
    fn from(msg: String) -> Self {
        InventoryError::ServiceCommunicationError(msg)
    }
}
