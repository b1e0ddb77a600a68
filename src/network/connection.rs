//! Connection Establishment
//!
//! Dials an endpoint and hands back one open duplex connection.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async_with_config, MaybeTlsStream, WebSocketStream};

use super::{CommandSender, Endpoint, Receiver};
use crate::config::ClientConfig;
use crate::error::ConnectError;
use crate::sink::Sink;

/// The transport stream under a connection
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// An open, message-framed connection to one endpoint
pub struct Connection {
    /// WebSocket stream (both directions)
    stream: WsStream,

    /// Endpoint this connection was opened against
    endpoint: Endpoint,
}

impl Connection {
    /// Open a connection to `config.endpoint`.
    ///
    /// Performs exactly one dial. Failures are classified into a
    /// [`ConnectError`] and returned; there is no retry.
    pub async fn open(config: &ClientConfig) -> Result<Self, ConnectError> {
        let endpoint = config.endpoint.clone();
        tracing::debug!("Dialing {}", endpoint);

        let dial = connect_async_with_config(
            endpoint.as_str(),
            Some(config.websocket_config()),
            config.nodelay,
        );

        let result = match config.connect_timeout() {
            Some(limit) => match tokio::time::timeout(limit, dial).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(ConnectError::Timeout {
                        endpoint: endpoint.to_string(),
                        timeout_ms: config.connect_timeout_ms,
                    })
                }
            },
            None => dial.await,
        };

        let (stream, response) =
            result.map_err(|e| ConnectError::from_transport(endpoint.as_str(), e))?;

        tracing::debug!(
            "Handshake with {} complete (status {})",
            endpoint,
            response.status()
        );

        Ok(Self { stream, endpoint })
    }

    /// Get the endpoint this connection was opened against
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Split into the single writer and the single reader.
    ///
    /// Both halves report to `events`.
    pub fn split(self, events: Arc<dyn Sink>) -> (CommandSender, Receiver) {
        let (write_half, read_half) = self.stream.split();
        let sender = CommandSender::new(write_half, Arc::clone(&events));
        let receiver = Receiver::new(read_half, events);
        (sender, receiver)
    }
}
