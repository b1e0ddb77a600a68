//! Event Sink
//!
//! The collaborator that receives everything the client has to report:
//! dial failures, encode/write failures, inbound messages and the end of
//! the read loop. Each event renders to one line of text.

use std::fmt;

use crossbeam::channel::{self, Receiver, Sender};

use crate::network::StopReason;
use crate::protocol::InboundMessage;

/// Something the client reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Dial failed; nothing was sent
    ConnectFailed { endpoint: String, reason: String },

    /// A command could not be encoded; nothing was sent
    EncodeFailed { method: String, reason: String },

    /// A command could not be written to the connection
    WriteFailed { method: String, reason: String },

    /// A message arrived from the server
    Received(InboundMessage),

    /// The read loop ended and will not restart
    ReceiverStopped(StopReason),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ConnectFailed { endpoint, reason } => {
                write!(f, "Connection error ({}): {}", endpoint, reason)
            }
            Event::EncodeFailed { method, reason } => {
                write!(f, "Encode error ({}): {}", method, reason)
            }
            Event::WriteFailed { method, reason } => {
                write!(f, "Write error ({}): {}", method, reason)
            }
            Event::Received(message) => write!(f, "Received: {}", message),
            Event::ReceiverStopped(reason) => write!(f, "Read loop stopped: {}", reason),
        }
    }
}

/// Accepts events from the client
pub trait Sink: Send + Sync {
    fn record(&self, event: Event);
}

// =============================================================================
// Console
// =============================================================================

/// Prints inbound messages to stdout and logs everything else
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn record(&self, event: Event) {
        match &event {
            Event::Received(_) => println!("{}", event),
            Event::ReceiverStopped(StopReason::Failed(_)) => tracing::warn!("{}", event),
            Event::ReceiverStopped(_) => tracing::info!("{}", event),
            _ => tracing::error!("{}", event),
        }
    }
}

// =============================================================================
// Channel
// =============================================================================

/// Forwards every event into an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<Event>,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its channel
    pub fn new() -> (Self, Receiver<Event>) {
        let (tx, rx) = channel::unbounded();
        (Self { tx }, rx)
    }
}

impl Sink for ChannelSink {
    fn record(&self, event: Event) {
        if self.tx.send(event).is_err() {
            tracing::trace!("Event channel closed, dropping event");
        }
    }
}
