//! # Order Service
//!
//! Orders reserve stock from the inventory service line by line and release it again when
//! cancelled. There is no distributed transaction: each line's outcome is recorded, and
//! cancellation compensates exactly the lines that succeeded.
//!
//! - [`store`] - [`OrderStore`]: the order book and the reservation protocol
//! - [`service`] - [`OrderService`]: the [`RpcService`](rpc_framework::RpcService) façade
//! - [`calls`] - [`OrderCall`] and [`OrderReply`]
//! - [`error`] - [`OrderError`] and [`InterruptedOrder`]

pub mod calls;
pub mod error;
pub mod service;
pub mod store;

pub use calls::*;
pub use error::*;
pub use service::*;
pub use store::*;

use crate::clients::InventoryClient;
use rpc_framework::{RpcClient, RpcServer, ShutdownSignal};
use std::sync::Arc;

/// Creates a new order server backed by `inventory`, and its local client.
pub fn new(
    workers: usize,
    shutdown: ShutdownSignal,
    inventory: InventoryClient,
) -> (RpcServer<OrderService>, RpcClient<OrderService>) {
    let service = Arc::new(OrderService::new(inventory, shutdown.clone()));
    RpcServer::new(service, workers, 32, shutdown)
}
