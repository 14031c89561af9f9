//! # Framework Errors
//!
//! This module defines the transport-level error types used throughout the RPC framework.
//! Business outcomes never travel through these errors: a service answers "unknown product"
//! or "insufficient stock" inside its reply. A `FrameworkError` means the call itself did not
//! complete.

/// Errors that can occur while delivering a call or its reply.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    /// The server stopped receiving calls (shut down or never started).
    #[error("Service closed")]
    ServiceClosed,
    /// The server accepted the call but dropped the reply channel.
    #[error("Service dropped response channel")]
    ServiceDropped,
    /// Connecting to, writing to or reading from the remote endpoint failed.
    #[error("Transport error: {0}")]
    Transport(String),
    /// A frame could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(String),
    /// The remote side reported a framework failure of its own.
    #[error("Remote error: {0}")]
    Remote(String),
}

impl From<std::io::Error> for FrameworkError {
    fn from(e: std::io::Error) -> Self {
        FrameworkError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for FrameworkError {
    fn from(e: serde_json::Error) -> Self {
        FrameworkError::Codec(e.to_string())
    }
}
