//! Calls accepted by the inventory service.
//!
//! These are the wire-level operations of the service, handled by
//! [`InventoryService`](crate::inventory_service::InventoryService).

use crate::model::{ProductId, ProductListing, StockStatus};
use serde::{Deserialize, Serialize};

/// Operations of the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCall {
    /// Adds a product, or adds to the quantity of the product with the same description.
    AddProduct { description: String, quantity: u32 },
    /// Applies a signed change to one product's quantity.
    ///
    /// # Errors
    /// Reported in-band: `InsufficientStock` if the result would be negative,
    /// `UnknownProduct` if the id does not exist.
    ChangeQuantity { product_id: ProductId, delta: i64 },
    /// Lists every product in ascending id order.
    ListProducts,
    /// Reports the product count and stops the service once in-flight calls drain.
    Shutdown,
}

/// Replies from the inventory service - variants match 1:1 with InventoryCall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryReply {
    AddProduct(ProductId),
    ChangeQuantity(StockStatus),
    ListProducts(Vec<ProductListing>),
    Shutdown { total_products: usize },
}
