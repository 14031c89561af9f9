//! In-band status codes shared by both services.
//!
//! Every business outcome travels as a plain integer on the wire: a non-negative value is a
//! success carrying the resulting quantity, negative values name a failure kind. Inside the
//! crate these are enums; the integer form only appears at the serde boundary and in the
//! command-line output.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Wire code for insufficient stock.
pub const INSUFFICIENT_STOCK: i64 = -1;
/// Wire code for an unknown product.
pub const UNKNOWN_PRODUCT: i64 = -2;
/// Wire code for a successful cancellation.
pub const CANCELLED: i64 = 0;
/// Wire code for an unknown order.
pub const UNKNOWN_ORDER: i64 = -1;

/// A status integer outside the codes a given status type defines.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid status code: {0}")]
pub struct InvalidStatusCode(pub i64);

/// Outcome of one stock change (ChangeQuantity, and each order line that reserved through it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum StockStatus {
    /// The change was applied; carries the resulting quantity (never negative).
    Committed(i64),
    /// Applying the change would have made the quantity negative. Nothing changed.
    InsufficientStock,
    /// No product has the requested id.
    UnknownProduct,
}

impl StockStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, StockStatus::Committed(_))
    }

    pub fn code(&self) -> i64 {
        match self {
            StockStatus::Committed(quantity) => *quantity,
            StockStatus::InsufficientStock => INSUFFICIENT_STOCK,
            StockStatus::UnknownProduct => UNKNOWN_PRODUCT,
        }
    }
}

impl From<StockStatus> for i64 {
    fn from(status: StockStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i64> for StockStatus {
    type Error = InvalidStatusCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            quantity if quantity >= 0 => Ok(StockStatus::Committed(quantity)),
            INSUFFICIENT_STOCK => Ok(StockStatus::InsufficientStock),
            UNKNOWN_PRODUCT => Ok(StockStatus::UnknownProduct),
            other => Err(InvalidStatusCode(other)),
        }
    }
}

impl Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Outcome of CancelOrder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum CancelStatus {
    Cancelled,
    UnknownOrder,
}

impl CancelStatus {
    pub fn code(&self) -> i64 {
        match self {
            CancelStatus::Cancelled => CANCELLED,
            CancelStatus::UnknownOrder => UNKNOWN_ORDER,
        }
    }
}

impl From<CancelStatus> for i64 {
    fn from(status: CancelStatus) -> Self {
        status.code()
    }
}

impl TryFrom<i64> for CancelStatus {
    type Error = InvalidStatusCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            CANCELLED => Ok(CancelStatus::Cancelled),
            UNKNOWN_ORDER => Ok(CancelStatus::UnknownOrder),
            other => Err(InvalidStatusCode(other)),
        }
    }
}

impl Display for CancelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
