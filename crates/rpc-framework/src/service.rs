//! # RpcService Trait
//!
//! The `RpcService` trait defines the contract every remote-call service implements to be
//! hosted by the generic [`RpcServer`](crate::RpcServer). A service names its call and reply
//! enums and handles one call at a time through a shared reference; concurrency comes from
//! the server running many handlers at once, so services guard their own state.
//!
//! # Architecture Note
//! The call and reply types are associated types. An inventory client sends
//! `InventoryCall` and receives `InventoryReply`; handing it an order call is a compile error.
//! Both must be serde types because the same values cross the TCP transport unchanged.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait that any service must implement to be hosted by `RpcServer`.
#[async_trait]
pub trait RpcService: Send + Sync + 'static {
    /// Enum of the operations this service accepts.
    type Call: Serialize + DeserializeOwned + Send + Sync + Debug + 'static;

    /// Enum of the replies, variants matching the calls 1:1.
    type Reply: Serialize + DeserializeOwned + Send + Sync + Debug + 'static;

    /// Short name used in log fields (e.g. `"inventory"`).
    const NAME: &'static str;

    /// Handle one call.
    ///
    /// Business failures belong inside `Self::Reply`. The handler has no error channel of its
    /// own; the framework reports only delivery failures.
    async fn handle(&self, call: Self::Call) -> Self::Reply;
}
