//! Error types for the OrionDB client
//!
//! Provides a unified error type for all operations, plus a dedicated
//! error for connection establishment.

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

/// Result type alias using OrionError
pub type Result<T> = std::result::Result<T, OrionError>;

/// Unified error type for client operations
#[derive(Debug, Error)]
pub enum OrionError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connect(#[from] ConnectError),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Write error: {0}")]
    Write(#[source] WsError),

    // -------------------------------------------------------------------------
    // Task Errors
    // -------------------------------------------------------------------------
    #[error("Receiver error: {0}")]
    Receiver(String),
}

/// Failure to open a connection to an endpoint.
///
/// Returned to the caller instead of aborting; retry policy belongs to
/// the surrounding application.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid endpoint {endpoint}: {source}")]
    InvalidEndpoint { endpoint: String, source: WsError },

    #[error("endpoint {endpoint} unreachable: {source}")]
    Unreachable { endpoint: String, source: WsError },

    #[error("handshake with {endpoint} failed: {source}")]
    Handshake { endpoint: String, source: WsError },

    #[error("connecting to {endpoint} timed out after {timeout_ms} ms")]
    Timeout { endpoint: String, timeout_ms: u64 },
}

impl ConnectError {
    /// Classify a transport error raised while dialing `endpoint`
    pub(crate) fn from_transport(endpoint: &str, source: WsError) -> Self {
        let endpoint = endpoint.to_string();
        match source {
            WsError::Url(_) | WsError::HttpFormat(_) => {
                ConnectError::InvalidEndpoint { endpoint, source }
            }
            WsError::Io(_) => ConnectError::Unreachable { endpoint, source },
            _ => ConnectError::Handshake { endpoint, source },
        }
    }

    /// The endpoint the failed dial was aimed at
    pub fn endpoint(&self) -> &str {
        match self {
            ConnectError::InvalidEndpoint { endpoint, .. }
            | ConnectError::Unreachable { endpoint, .. }
            | ConnectError::Handshake { endpoint, .. }
            | ConnectError::Timeout { endpoint, .. } => endpoint,
        }
    }
}
