//! Client
//!
//! Ties a connection, its two halves and the event sink together.
//!
//! ## Lifecycle
//! ```text
//! connect ──► spawn read loop ──► wait for "ready" ──► send ... ──► wait
//!    │                                                               │
//!    └─ ConnectError (reported once, nothing sent)     StopReason ◄──┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::config::ClientConfig;
use crate::error::{OrionError, Result};
use crate::network::{CommandSender, Connection, Endpoint, StopReason};
use crate::protocol::Command;
use crate::sink::{Event, Sink};

/// A connected client: one connection, one writer, one background reader
pub struct Client {
    /// Write half, used from the caller's task
    sender: CommandSender,

    /// Background read loop
    receiver: JoinHandle<StopReason>,

    /// Stops the read loop
    cancel: CancellationToken,

    /// Cancels the read loop when the client is dropped
    _guard: DropGuard,

    /// Endpoint the connection was opened against
    endpoint: Endpoint,
}

impl Client {
    /// Connect to `config.endpoint` and start the read loop.
    ///
    /// Returns once the read loop is running, so nothing the server sends
    /// after this point can be missed. A dial failure is reported to
    /// `events` and returned.
    pub async fn connect(config: &ClientConfig, events: Arc<dyn Sink>) -> Result<Self> {
        let connection = match Connection::open(config).await {
            Ok(connection) => connection,
            Err(e) => {
                events.record(Event::ConnectFailed {
                    endpoint: e.endpoint().to_string(),
                    reason: e.to_string(),
                });
                return Err(e.into());
            }
        };

        let endpoint = connection.endpoint().clone();
        let (sender, receiver) = connection.split(events);

        let cancel = CancellationToken::new();
        let (ready_tx, ready_rx) = oneshot::channel();
        let handle = tokio::spawn(receiver.run(ready_tx, cancel.clone()));

        ready_rx.await.map_err(|_| {
            OrionError::Receiver("read loop exited before it was ready".to_string())
        })?;

        tracing::info!("Connected to {}", endpoint);

        Ok(Self {
            sender,
            receiver: handle,
            _guard: cancel.clone().drop_guard(),
            cancel,
            endpoint,
        })
    }

    /// Send one command. See [`CommandSender::send`].
    pub async fn send(&mut self, command: &Command) -> Result<()> {
        self.sender.send(command).await
    }

    /// Send an arbitrary value under `method`. See [`CommandSender::send_value`].
    pub async fn send_value<T: ?Sized + Serialize>(&mut self, method: &str, value: &T) -> Result<()> {
        self.sender.send_value(method, value).await
    }

    /// Token that stops the read loop when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop the read loop
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// True while the read loop is running
    pub fn is_receiving(&self) -> bool {
        !self.receiver.is_finished()
    }

    /// Get the endpoint this client is connected to
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Wait for the read loop to end
    pub async fn wait(self) -> Result<StopReason> {
        let Client { receiver, _guard, .. } = self;
        receiver
            .await
            .map_err(|e| OrionError::Receiver(e.to_string()))
    }

    /// Close the connection gracefully and wait for the read loop to end
    pub async fn close(mut self) -> Result<StopReason> {
        if let Err(e) = self.sender.close().await {
            tracing::debug!("Close handshake failed on {}: {}", self.endpoint, e);
            self.cancel.cancel();
        }
        self.wait().await
    }
}
