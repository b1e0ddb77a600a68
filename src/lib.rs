//! # OrionDB Client
//!
//! An asynchronous command client for the OrionDB socket service:
//! - One persistent WebSocket connection per client
//! - Typed commands encoded as `{"method": ..., "value": ...}` JSON frames
//! - A background read loop that streams every server message into a sink
//! - Typed connect errors, readiness handshake, cancellation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                               │
//! │              connect / send / wait / shutdown                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Connection                              │
//! │                (WebSocket, split in two)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │CommandSender│          │  Receiver   │
//!   │ (encode+tx) │          │ (read loop) │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          └───────────┬────────────┘
//!                      ▼
//!               ┌─────────────┐
//!               │    Sink     │
//!               │  (events)   │
//!               └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use orion_client::{Client, ClientConfig, Command, ConsoleSink};
//!
//! # async fn run() -> orion_client::Result<()> {
//! let config = ClientConfig::builder()
//!     .endpoint("ws://localhost:5665/test_db@12345/users")
//!     .build();
//!
//! let mut client = Client::connect(&config, Arc::new(ConsoleSink)).await?;
//! client.send(&Command::get(true)).await?;
//! client.wait().await?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod sink;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ConnectError, OrionError, Result};
pub use config::ClientConfig;
pub use client::Client;
pub use network::{Endpoint, StopReason};
pub use protocol::{Command, InboundMessage, Method, Record};
pub use sink::{ChannelSink, ConsoleSink, Event, Sink};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
