//! # Inventory Service
//!
//! This module implements the product inventory: a store with per-product locking and the RPC
//! service in front of it.
//!
//! ## Structure
//!
//! - [`store`] - [`InventoryStore`]: product records, the structural lock and per-product locks
//! - [`service`] - [`InventoryService`]: the [`RpcService`](rpc_framework::RpcService) façade
//! - [`calls`] - [`InventoryCall`] and [`InventoryReply`], the wire operations
//! - [`error`] - [`InventoryError`] for callers of the service
//! - [`new()`] - Factory function that creates the server and a local client
//!
//! ## Usage
//!
//! ```rust
//! use stockroom::inventory_service;
//! use stockroom::clients::InventoryClient;
//! use stockroom::model::StockStatus;
//! use rpc_framework::ShutdownSignal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (server, generic_client) = inventory_service::new(10, ShutdownSignal::new());
//!     let handle = tokio::spawn(server.run());
//!     let client = InventoryClient::new(generic_client);
//!
//!     let id = client.add_product("Widget", 10).await?;
//!     assert_eq!(client.change_quantity(id, -3).await?, StockStatus::Committed(7));
//!
//!     client.shutdown().await?;
//!     handle.await?;
//!     Ok(())
//! }
//! ```

pub mod calls;
pub mod error;
pub mod service;
pub mod store;

pub use calls::*;
pub use error::*;
pub use service::*;
pub use store::*;

use rpc_framework::{RpcClient, RpcServer, ShutdownSignal};
use std::sync::Arc;

/// Creates a new inventory server with `workers` concurrent handlers, and its local client.
pub fn new(
    workers: usize,
    shutdown: ShutdownSignal,
) -> (RpcServer<InventoryService>, RpcClient<InventoryService>) {
    let service = Arc::new(InventoryService::new(shutdown.clone()));
    RpcServer::new(service, workers, 32, shutdown)
}
