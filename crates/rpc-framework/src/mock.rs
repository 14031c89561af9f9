//! # Mock Framework & Testing Guide
//!
//! `MockClient<S>` hands out a real [`RpcClient<S>`] whose calls are answered from a queue of
//! scripted expectations instead of a running service. Use it to test a component that
//! *depends on* a service (the order store calling inventory, say) without starting that
//! service.
//!
//! ## When to use Mocks vs Real Services
//!
//! | Feature | MockClient | Real Server |
//! |---------|------------|-------------|
//! | **Speed** | Instant (in-memory) | Fast (spawns a worker pool) |
//! | **Determinism** | Scripted replies | Depends on real state |
//! | **Call checking** | Every call compared with the script | None |
//! | **Error Injection** | Easy (`return_err`) | Hard (needs a broken transport) |
//!
//! ## Example
//!
//! ```rust
//! use rpc_framework::mock::MockClient;
//! use rpc_framework::{FrameworkError, RpcService};
//! use async_trait::async_trait;
//! use serde::{Deserialize, Serialize};
//!
//! struct Counter;
//! #[derive(Debug, PartialEq, Serialize, Deserialize)] enum CounterCall { Add(i64) }
//! #[derive(Debug, PartialEq, Serialize, Deserialize)] enum CounterReply { Total(i64) }
//!
//! #[async_trait]
//! impl RpcService for Counter {
//!     type Call = CounterCall;
//!     type Reply = CounterReply;
//!     const NAME: &'static str = "counter";
//!     async fn handle(&self, _: CounterCall) -> CounterReply { CounterReply::Total(0) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Counter>::new();
//!     mock.expect_call(CounterCall::Add(2)).return_ok(CounterReply::Total(2));
//!     mock.expect_call(CounterCall::Add(3)).return_err(FrameworkError::ServiceClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.call(CounterCall::Add(2)).await, Ok(CounterReply::Total(2)));
//!     assert_eq!(client.call(CounterCall::Add(3)).await, Err(FrameworkError::ServiceClosed));
//!
//!     mock.verify();
//! }
//! ```
//!
//! A call that does not match the next expectation (or arrives when the script is empty) is
//! recorded as a mismatch, answered with [`FrameworkError::Remote`], and reported by
//! [`MockClient::verify`].

use crate::client::RpcClient;
use crate::error::FrameworkError;
use crate::message::Request;
use crate::service::RpcService;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

/// One scripted call and the response to give it.
struct Expectation<S: RpcService> {
    call: S::Call,
    response: Result<S::Reply, FrameworkError>,
}

struct Script<S: RpcService> {
    expectations: VecDeque<Expectation<S>>,
    mismatches: Vec<String>,
}

fn lock<S: RpcService>(script: &Mutex<Script<S>>) -> MutexGuard<'_, Script<S>> {
    // A panic inside a test must not hide the expectations that were left.
    script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<S: RpcService> {
    client: RpcClient<S>,
    script: Arc<Mutex<Script<S>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: RpcService> Default for MockClient<S>
where
    S::Call: PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RpcService> MockClient<S>
where
    S::Call: PartialEq,
{
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<Request<S>>(100);
        let script = Arc::new(Mutex::new(Script {
            expectations: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let script_clone = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(Request { call, respond_to }) = receiver.recv().await {
                let response = {
                    let mut script = lock(&script_clone);
                    match script.expectations.pop_front() {
                        Some(expected) if expected.call == call => expected.response,
                        Some(expected) => {
                            let mismatch =
                                format!("expected {:?}, got {:?}", expected.call, call);
                            script.mismatches.push(mismatch.clone());
                            Err(FrameworkError::Remote(mismatch))
                        }
                        None => {
                            let mismatch = format!("unexpected call {call:?}");
                            script.mismatches.push(mismatch.clone());
                            Err(FrameworkError::Remote(mismatch))
                        }
                    }
                };
                let _ = respond_to.send(response);
            }
        });

        Self {
            client: RpcClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> RpcClient<S> {
        self.client.clone()
    }

    /// Expects `call` as the next call in order.
    pub fn expect_call(&mut self, call: S::Call) -> CallExpectationBuilder<S> {
        CallExpectationBuilder {
            call,
            script: self.script.clone(),
        }
    }

    /// Verifies that every expectation was met and no unexpected call arrived.
    pub fn verify(&self) {
        let script = lock(&self.script);
        if !script.mismatches.is_empty() {
            panic!("Unexpected calls: {:?}", script.mismatches);
        }
        if !script.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expectations.len()
            );
        }
    }
}

/// Builder for call expectations.
pub struct CallExpectationBuilder<S: RpcService> {
    call: S::Call,
    script: Arc<Mutex<Script<S>>>,
}

impl<S: RpcService> CallExpectationBuilder<S> {
    /// Sets the expectation to return a successful reply.
    pub fn return_ok(self, reply: S::Reply) {
        lock(&self.script).expectations.push_back(Expectation {
            call: self.call,
            response: Ok(reply),
        });
    }

    /// Sets the expectation to fail with a framework error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.script).expectations.push_back(Expectation {
            call: self.call,
            response: Err(error),
        });
    }
}

/// Creates a bare client and the receiver its calls arrive on.
///
/// Use this when a test needs to hold a reply back (to observe what the caller does while it
/// waits) rather than answer from a script.
pub fn create_mock_client<S: RpcService>(
    buffer_size: usize,
) -> (RpcClient<S>, mpsc::Receiver<Request<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RpcClient::new(sender), receiver)
}

/// Helper to take the next call from a bare mock receiver.
pub async fn expect_request<S: RpcService>(
    receiver: &mut mpsc::Receiver<Request<S>>,
) -> Option<(
    S::Call,
    tokio::sync::oneshot::Sender<Result<S::Reply, FrameworkError>>,
)> {
    receiver
        .recv()
        .await
        .map(|Request { call, respond_to }| (call, respond_to))
}
