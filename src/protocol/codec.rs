//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! One JSON object per text frame, exactly two top-level fields:
//! ```text
//! {"method":"insertMany","value":[{"id":1,"test":"test","cool":1}]}
//! ```
//!
//! ### Value by Method
//! - insert:     record
//! - insertMany: [record, ...]
//! - update:     [filter, changes]
//! - remove:     query
//! - get:        flatten (bool)
//! - search:     query
//! - other:      any JSON, carried verbatim

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::{Command, Method, Record};
use crate::error::{OrionError, Result};

/// Outbound envelope, borrowed from the command being sent
#[derive(Serialize)]
struct Envelope<'a, T: ?Sized + Serialize> {
    method: &'a str,
    value: &'a T,
}

/// Inbound envelope with the value left undecoded until the method is known
#[derive(Deserialize)]
struct RawEnvelope {
    method: String,
    value: Box<RawValue>,
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a command to its wire text
pub fn encode_command(command: &Command) -> Result<String> {
    match command {
        Command::Insert { record } => encode_value(Method::Insert.as_str(), record),
        Command::InsertMany { records } => encode_value(Method::InsertMany.as_str(), records),
        Command::Update { filter, changes } => {
            encode_value(Method::Update.as_str(), &(filter, changes))
        }
        Command::Remove { query } => encode_value(Method::Remove.as_str(), query),
        Command::Get { flatten } => encode_value(Method::Get.as_str(), flatten),
        Command::Search { query } => encode_value(Method::Search.as_str(), query),
        Command::Opaque { method, value } => encode_value(method, value),
    }
}

/// Encode an arbitrary serializable value under `method`.
///
/// Fails when `value` has no JSON form (e.g. a map with non-string keys).
pub fn encode_value<T: ?Sized + Serialize>(method: &str, value: &T) -> Result<String> {
    let text = serde_json::to_string(&Envelope { method, value })?;
    Ok(text)
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode wire text back into a command.
///
/// Unknown methods decode to [`Command::Opaque`].
pub fn decode_command(text: &str) -> Result<Command> {
    let envelope: RawEnvelope = serde_json::from_str(text)?;

    let kind = match Method::from_name(&envelope.method) {
        Some(kind) => kind,
        None => {
            return Ok(Command::Opaque {
                method: envelope.method,
                value: envelope.value,
            })
        }
    };

    let raw = envelope.value.get();
    let command = match kind {
        Method::Insert => Command::Insert {
            record: decode_value(kind, raw)?,
        },
        Method::InsertMany => Command::InsertMany {
            records: decode_value(kind, raw)?,
        },
        Method::Update => {
            let (filter, changes): (Record, Record) = decode_value(kind, raw)?;
            Command::Update { filter, changes }
        }
        Method::Remove => Command::Remove {
            query: decode_value(kind, raw)?,
        },
        Method::Get => Command::Get {
            flatten: decode_value(kind, raw)?,
        },
        Method::Search => Command::Search {
            query: decode_value(kind, raw)?,
        },
    };

    Ok(command)
}

/// Decode the value of a known method
fn decode_value<T: DeserializeOwned>(method: Method, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        OrionError::Protocol(format!("{} command: invalid value: {}", method.as_str(), e))
    })
}
