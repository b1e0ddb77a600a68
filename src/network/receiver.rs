//! Receive half
//!
//! Drains inbound messages into the sink until the connection ends.

use std::fmt;
use std::sync::Arc;

use futures_util::stream::SplitStream;
use futures_util::StreamExt;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use super::connection::WsStream;
use crate::protocol::InboundMessage;
use crate::sink::{Event, Sink};

/// Why the read loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Peer sent a close frame or the stream ended
    ClosedByPeer,

    /// Read error
    Failed(String),

    /// Cancelled locally
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::ClosedByPeer => f.write_str("connection closed by peer"),
            StopReason::Failed(reason) => write!(f, "read error: {}", reason),
            StopReason::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Read half of a connection. There is only ever one.
pub struct Receiver {
    /// Inbound side of the WebSocket
    frames: SplitStream<WsStream>,

    /// Where inbound messages and the final stop are reported
    events: Arc<dyn Sink>,
}

impl Receiver {
    pub(crate) fn new(frames: SplitStream<WsStream>, events: Arc<dyn Sink>) -> Self {
        Self { frames, events }
    }

    /// Run the read loop.
    ///
    /// Fires `ready` before the first read, then hands every data message
    /// to the sink in arrival order. Stops on the first read failure, a
    /// close from the peer, or cancellation, and reports that exactly once.
    pub async fn run(mut self, ready: oneshot::Sender<()>, cancel: CancellationToken) -> StopReason {
        // The waiting side may have gone away; the loop runs regardless
        let _ = ready.send(());

        let mut received: u64 = 0;

        let reason = loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => break StopReason::Cancelled,
                next = self.frames.next() => next,
            };

            match next {
                Some(Ok(Message::Close(frame))) => {
                    tracing::debug!("Close frame received: {:?}", frame);
                    break StopReason::ClosedByPeer;
                }
                Some(Ok(frame)) => match InboundMessage::from_frame(frame) {
                    Some(message) => {
                        received += 1;
                        tracing::trace!("Received message #{} ({} bytes)", received, message.len());
                        self.events.record(Event::Received(message));
                    }
                    None => tracing::trace!("Skipping control frame"),
                },
                Some(Err(e)) => break StopReason::Failed(e.to_string()),
                None => break StopReason::ClosedByPeer,
            }
        };

        tracing::debug!("Read loop stopped after {} messages: {}", received, reason);
        self.events.record(Event::ReceiverStopped(reason.clone()));
        reason
    }
}
