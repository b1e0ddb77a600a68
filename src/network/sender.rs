//! Send half
//!
//! Encodes commands and writes each as one text frame.

use std::sync::Arc;

use futures_util::stream::SplitSink;
use futures_util::SinkExt;
use serde::Serialize;
use tokio_tungstenite::tungstenite::Message;

use super::connection::WsStream;
use crate::error::{OrionError, Result};
use crate::protocol::{encode_command, encode_value, Command};
use crate::sink::{Event, Sink};

/// Write half of a connection. There is only ever one.
pub struct CommandSender {
    /// Outbound side of the WebSocket
    frames: SplitSink<WsStream, Message>,

    /// Where failures are reported
    events: Arc<dyn Sink>,
}

impl CommandSender {
    pub(crate) fn new(frames: SplitSink<WsStream, Message>, events: Arc<dyn Sink>) -> Self {
        Self { frames, events }
    }

    /// Encode and transmit a command.
    ///
    /// Does not wait for a reply; replies arrive through the receiver.
    /// Failures are reported to the sink and returned, the connection is
    /// left as it is.
    pub async fn send(&mut self, command: &Command) -> Result<()> {
        self.transmit(command.method(), encode_command(command)).await
    }

    /// Encode and transmit an arbitrary value under `method`
    pub async fn send_value<T: ?Sized + Serialize>(&mut self, method: &str, value: &T) -> Result<()> {
        self.transmit(method, encode_value(method, value)).await
    }

    /// Start the closing handshake
    pub async fn close(&mut self) -> Result<()> {
        self.frames.close().await.map_err(OrionError::Write)
    }

    async fn transmit(&mut self, method: &str, encoded: Result<String>) -> Result<()> {
        // Nothing reaches the wire unless encoding succeeded
        let text = match encoded {
            Ok(text) => text,
            Err(e) => {
                self.events.record(Event::EncodeFailed {
                    method: method.to_string(),
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };

        tracing::trace!("Sending {} ({} bytes)", method, text.len());

        // send = feed + flush, so the frame goes out whole
        if let Err(e) = self.frames.send(Message::Text(text)).await {
            self.events.record(Event::WriteFailed {
                method: method.to_string(),
                reason: e.to_string(),
            });
            return Err(OrionError::Write(e));
        }

        tracing::debug!("Sent {}", method);
        Ok(())
    }
}
