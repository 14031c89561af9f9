//! # Generic Client
//!
//! This module defines the generic client for calling a service, either in-process over the
//! server's channel or remotely over TCP.

use crate::error::FrameworkError;
use crate::message::Request;
use crate::service::RpcService;
use crate::tcp;
use std::fmt;
use std::net::SocketAddr;
use tokio::sync::{mpsc, oneshot};

/// ## RpcClient
///
/// The `RpcClient<S>` provides a type-safe, async `call` for a service `S`. It is cheap to
/// clone and can be shared across tasks.
///
/// * **Local**: holds the sender half of an `RpcServer`'s channel.
/// * **Remote**: holds a socket address; every call opens one connection, writes one request
///   line and reads one reply line (see [`tcp`]).
///
/// Calls are never retried. A failed delivery surfaces as a [`FrameworkError`].
pub struct RpcClient<S: RpcService> {
    channel: Channel<S>,
}

enum Channel<S: RpcService> {
    Local(mpsc::Sender<Request<S>>),
    Remote(SocketAddr),
}

impl<S: RpcService> Clone for RpcClient<S> {
    fn clone(&self) -> Self {
        let channel = match &self.channel {
            Channel::Local(sender) => Channel::Local(sender.clone()),
            Channel::Remote(addr) => Channel::Remote(*addr),
        };
        Self { channel }
    }
}

impl<S: RpcService> fmt::Debug for RpcClient<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.channel {
            Channel::Local(_) => write!(f, "RpcClient<{}>(local)", S::NAME),
            Channel::Remote(addr) => write!(f, "RpcClient<{}>({})", S::NAME, addr),
        }
    }
}

impl<S: RpcService> RpcClient<S> {
    pub fn new(sender: mpsc::Sender<Request<S>>) -> Self {
        Self {
            channel: Channel::Local(sender),
        }
    }

    /// A client for a service listening at `addr`. No connection is made until the first call.
    pub fn remote(addr: SocketAddr) -> Self {
        Self {
            channel: Channel::Remote(addr),
        }
    }

    pub async fn call(&self, call: S::Call) -> Result<S::Reply, FrameworkError> {
        match &self.channel {
            Channel::Local(sender) => {
                let (respond_to, response) = oneshot::channel();
                sender
                    .send(Request { call, respond_to })
                    .await
                    .map_err(|_| FrameworkError::ServiceClosed)?;
                response.await.map_err(|_| FrameworkError::ServiceDropped)?
            }
            Channel::Remote(addr) => tcp::round_trip::<S>(*addr, &call).await,
        }
    }
}
