//! Typed wrappers around [`RpcClient`](rpc_framework::RpcClient), one per service.

pub mod inventory_client;
pub mod order_client;

pub use inventory_client::*;
pub use order_client::*;
