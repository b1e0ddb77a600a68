//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format
//!
//! Every command travels as a single WebSocket text frame holding a JSON
//! envelope:
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ {"method": <string>, "value": <method-specific JSON>} │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ### Methods
//! - insert, insertMany, update, remove, get, search
//! - anything else is passed through as an opaque command
//!
//! ### Inbound
//! Server messages are opaque text or binary and are not decoded.

mod command;
mod codec;
mod message;

pub use command::{Command, Method, Record};
pub use codec::{decode_command, encode_command, encode_value};
pub use message::InboundMessage;
