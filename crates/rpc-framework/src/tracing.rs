//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate for any process
//! that hosts or calls a service.
//!
//! ## Configuration
//!
//! - **Configurable log levels** via the `RUST_LOG` environment variable
//! - **Compact format** that hides module paths (`with_target(false)`); every framework event
//!   carries a `service` field instead
//! - **Standard error** as the sink, so a command-line client's standard output carries only
//!   its results
//!
//! ## What Gets Traced
//!
//! - **Server lifecycle**: `Server started`, `Draining`, `Shutdown`
//! - **Calls**: `Accepted` / `Handled` at `debug` with the full call and reply payloads
//! - **Transport**: listener start/stop and failed connections
//!
//! ```bash
//! RUST_LOG=info inventory-server 5000
//! RUST_LOG=debug order-server 5001 127.0.0.1:5000
//! ```
//!
//! Calling it twice in one process is harmless; the second call leaves the first subscriber
//! in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
}
