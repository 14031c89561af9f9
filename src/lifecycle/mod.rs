//! Startup, wiring and shutdown.
//!
//! - [`config`] - `clap` arguments of the binaries and their validation
//! - [`host()`] - serves one service over TCP until it is shut down
//! - [`StockSystem`] - both services in one process, for tests and embedding

pub mod config;
pub mod host;
pub mod system;

pub use config::*;
pub use host::*;
pub use system::*;
