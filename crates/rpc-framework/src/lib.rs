//! # RPC Framework
//!
//! This crate provides the call mechanism that the inventory and order services are built on:
//! a typed request/reply channel, a server with a bounded worker pool, a newline-delimited JSON
//! TCP transport, and a cooperative shutdown signal.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Service Layer** ([`RpcService`]) - Your business logic: a call enum, a reply enum and
//!    one async `handle` method.
//! 2. **Runtime Layer** ([`RpcServer`]) - Receives calls and runs up to `workers` of them at
//!    once until the [`ShutdownSignal`] is raised.
//! 3. **Interface Layer** ([`RpcClient`], [`ServiceClient`]) - Type-safe calling, either
//!    in-process or over [`tcp`].
//!
//! ```rust
//! use rpc_framework::{RpcServer, RpcService, ShutdownSignal};
//! use async_trait::async_trait;
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! struct Doubler;
//! #[derive(Debug, Serialize, Deserialize)] struct Double(i64);
//! #[derive(Debug, Serialize, Deserialize, PartialEq)] struct Doubled(i64);
//!
//! #[async_trait]
//! impl RpcService for Doubler {
//!     type Call = Double;
//!     type Reply = Doubled;
//!     const NAME: &'static str = "doubler";
//!     async fn handle(&self, call: Double) -> Doubled { Doubled(call.0 * 2) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let shutdown = ShutdownSignal::new();
//!     let (server, client) = RpcServer::new(Arc::new(Doubler), 4, 16, shutdown.clone());
//!     let handle = tokio::spawn(server.run());
//!
//!     assert_eq!(client.call(Double(21)).await, Ok(Doubled(42)));
//!
//!     shutdown.raise();
//!     handle.await.unwrap();
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each server runs its accept loop in one Tokio task
//! - Accepted calls run **concurrently**, bounded by the worker pool
//! - Services protect their own state; the framework never serializes calls for them
//!
//! ## Errors
//!
//! [`FrameworkError`] reports delivery failures only. Nothing is retried.
//!
//! ## Testing
//!
//! [`mock::MockClient`] scripts the replies of a service so that its callers can be tested
//! without running it.

pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod server;
pub mod service;
pub mod shutdown;
pub mod tcp;
pub mod tracing;

// Re-export core types for convenience
pub use client::RpcClient;
pub use client_trait::ServiceClient;
pub use error::FrameworkError;
pub use message::{Request, Response};
pub use server::RpcServer;
pub use service::RpcService;
pub use shutdown::ShutdownSignal;
