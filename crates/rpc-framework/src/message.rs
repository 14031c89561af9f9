//! # Call Envelope
//!
//! This module defines the message that travels from an `RpcClient` to an `RpcServer`
//! over the in-process channel.

use crate::error::FrameworkError;
use crate::service::RpcService;
use tokio::sync::oneshot;

/// Type alias for the one-shot reply channel carried by every call.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A single remote call waiting to be handled.
///
/// The call payload is the service's own [`RpcService::Call`] enum, so the compiler
/// guarantees an inventory call can never reach the order service and vice versa.
#[derive(Debug)]
pub struct Request<S: RpcService> {
    pub call: S::Call,
    pub respond_to: Response<S::Reply>,
}
