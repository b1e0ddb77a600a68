//! Configuration for the OrionDB client
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;

use crate::network::Endpoint;

/// Main configuration for a client connection
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Endpoint Configuration
    // -------------------------------------------------------------------------
    /// Target endpoint, e.g. `ws://localhost:5665/test_db@12345/users`
    pub endpoint: Endpoint,

    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// Dial timeout (milliseconds). 0 waits for the transport to give up.
    pub connect_timeout_ms: u64,

    /// Largest inbound message accepted (bytes), `None` for the transport default
    pub max_message_size: Option<usize>,

    /// Largest single inbound frame accepted (bytes), `None` for the transport default
    pub max_frame_size: Option<usize>,

    /// Disable Nagle's algorithm on the underlying socket
    pub nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            connect_timeout_ms: 0,
            max_message_size: Some(64 << 20), // 64 MB
            max_frame_size: Some(16 << 20),   // 16 MB
            nodelay: true,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Dial timeout, if one is configured
    pub fn connect_timeout(&self) -> Option<Duration> {
        if self.connect_timeout_ms > 0 {
            Some(Duration::from_millis(self.connect_timeout_ms))
        } else {
            None
        }
    }

    /// Transport-level settings handed to the WebSocket layer
    pub fn websocket_config(&self) -> WebSocketConfig {
        let mut ws = WebSocketConfig::default();
        ws.max_message_size = self.max_message_size;
        ws.max_frame_size = self.max_frame_size;
        ws
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the target endpoint
    pub fn endpoint(mut self, endpoint: impl Into<Endpoint>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the dial timeout (in milliseconds, 0 disables it)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the maximum inbound message size (in bytes)
    pub fn max_message_size(mut self, size: Option<usize>) -> Self {
        self.config.max_message_size = size;
        self
    }

    /// Set the maximum inbound frame size (in bytes)
    pub fn max_frame_size(mut self, size: Option<usize>) -> Self {
        self.config.max_frame_size = size;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, enabled: bool) -> Self {
        self.config.nodelay = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
