//! Network Module
//!
//! WebSocket connection handling.
//!
//! ## Architecture
//! - One dial per connection, no reconnect
//! - Connection split into one writer (`CommandSender`) and one reader (`Receiver`)
//! - The reader runs on its own task and reports into the event sink

mod endpoint;
mod connection;
mod sender;
mod receiver;

pub use endpoint::{Endpoint, EndpointBuilder, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SCHEME};
pub use connection::{Connection, WsStream};
pub use sender::CommandSender;
pub use receiver::{Receiver, StopReason};
