//! # Generic Worker-Pool Server
//!
//! This module defines the `RpcServer`, the component that receives calls for one service and
//! runs them on a bounded pool of workers.

use crate::client::RpcClient;
use crate::error::FrameworkError;
use crate::message::Request;
use crate::service::RpcService;
use crate::shutdown::ShutdownSignal;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// The generic server that hosts one [`RpcService`].
///
/// # Concurrency Model
/// Calls run **concurrently**: each accepted call is
/// spawned onto a `JoinSet` and holds one permit of a `Semaphore` sized to the worker count.
/// When every worker is busy the accept loop waits for a permit, so at most `workers` handlers
/// are in flight. The service therefore owns its own locking.
///
/// # Usage Pattern
///
/// 1.  **Create**: `RpcServer::new(service, workers, buffer, shutdown)` returns the server and
///     a local [`RpcClient`].
/// 2.  **Run**: spawn `server.run()`.
/// 3.  **Stop**: raise the [`ShutdownSignal`] (or drop every client). The loop stops accepting,
///     waits for in-flight calls, and returns.
///
/// Calls still queued in the channel when the signal is observed are dropped; their callers
/// receive [`FrameworkError::ServiceDropped`].
pub struct RpcServer<S: RpcService> {
    receiver: mpsc::Receiver<Request<S>>,
    service: Arc<S>,
    workers: Arc<Semaphore>,
    shutdown: ShutdownSignal,
}

impl<S: RpcService> RpcServer<S> {
    /// Creates a new `RpcServer` and its associated local `RpcClient`.
    ///
    /// # Arguments
    ///
    /// * `service` - The shared service; the caller may keep another `Arc` to it.
    /// * `workers` - Maximum number of calls handled at once (at least 1).
    /// * `buffer_size` - Capacity of the call channel. When full, callers wait.
    /// * `shutdown` - The signal whose raising ends the accept loop.
    pub fn new(
        service: Arc<S>,
        workers: usize,
        buffer_size: usize,
        shutdown: ShutdownSignal,
    ) -> (Self, RpcClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let server = Self {
            receiver,
            service,
            workers: Arc::new(Semaphore::new(workers.max(1))),
            shutdown,
        };
        (server, RpcClient::new(sender))
    }

    /// Runs the accept loop until shutdown, then drains in-flight calls.
    pub async fn run(mut self) {
        let service = S::NAME;
        info!(service, "Server started");

        let mut in_flight = JoinSet::new();
        loop {
            let request = tokio::select! {
                biased;
                _ = self.shutdown.raised() => break,
                request = self.receiver.recv() => request,
            };
            let Some(Request { call, respond_to }) = request else {
                break;
            };

            let permit = tokio::select! {
                biased;
                _ = self.shutdown.raised() => {
                    let _ = respond_to.send(Err(FrameworkError::ServiceClosed));
                    break;
                }
                permit = self.workers.clone().acquire_owned() => permit,
            };
            let Ok(permit) = permit else {
                warn!(service, "Worker pool closed");
                break;
            };

            debug!(service, ?call, "Accepted");
            let handler = self.service.clone();
            in_flight.spawn(async move {
                let reply = handler.handle(call).await;
                debug!(service, ?reply, "Handled");
                if respond_to.send(Ok(reply)).is_err() {
                    warn!(service, "Caller went away before the reply");
                }
                drop(permit);
            });

            // Reap finished handlers so the set does not grow without bound.
            while let Some(joined) = in_flight.try_join_next() {
                if let Err(e) = joined {
                    warn!(service, error = %e, "Handler panicked");
                }
            }
        }

        self.receiver.close();
        info!(service, in_flight = in_flight.len(), "Draining");
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                warn!(service, error = %e, "Handler panicked");
            }
        }
        info!(service, "Shutdown");
    }
}
