//! Inbound message definitions
//!
//! Whatever the server streams back. Replies are not correlated with
//! commands and their contents are not interpreted.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use tokio_tungstenite::tungstenite::Message;

/// A data message received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    Text(String),
    Binary(Bytes),
}

impl InboundMessage {
    /// Convert a transport frame. Control frames yield `None`.
    pub fn from_frame(frame: Message) -> Option<Self> {
        match frame {
            Message::Text(text) => Some(InboundMessage::Text(text)),
            Message::Binary(data) => Some(InboundMessage::Binary(Bytes::from(data))),
            Message::Ping(_) | Message::Pong(_) | Message::Close(_) | Message::Frame(_) => None,
        }
    }

    /// Raw payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            InboundMessage::Text(text) => text.as_bytes(),
            InboundMessage::Binary(data) => data,
        }
    }

    /// Payload as text, replacing invalid UTF-8
    pub fn to_text_lossy(&self) -> Cow<'_, str> {
        match self {
            InboundMessage::Text(text) => Cow::Borrowed(text),
            InboundMessage::Binary(data) => String::from_utf8_lossy(data),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl fmt::Display for InboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text_lossy())
    }
}
