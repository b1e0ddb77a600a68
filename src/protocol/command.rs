//! Command definitions
//!
//! Represents commands sent to the server.

use serde_json::value::RawValue;
use serde_json::{Map, Value};

use crate::error::Result;

/// A flat key→value document. Key order is preserved on the wire.
pub type Record = Map<String, Value>;

/// Methods understood by the OrionDB socket service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Insert,
    InsertMany,
    Update,
    Remove,
    Get,
    Search,
}

impl Method {
    /// Every known method
    pub const ALL: [Method; 6] = [
        Method::Insert,
        Method::InsertMany,
        Method::Update,
        Method::Remove,
        Method::Get,
        Method::Search,
    ];

    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Insert => "insert",
            Method::InsertMany => "insertMany",
            Method::Update => "update",
            Method::Remove => "remove",
            Method::Get => "get",
            Method::Search => "search",
        }
    }

    /// Look up a method by its wire name
    pub fn from_name(name: &str) -> Option<Method> {
        Method::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

/// A command, keyed by method
#[derive(Debug, Clone)]
pub enum Command {
    /// Insert one record
    Insert { record: Record },

    /// Insert records in order
    InsertMany { records: Vec<Record> },

    /// Apply `changes` to every record matching `filter`
    Update { filter: Record, changes: Record },

    /// Remove every record matching `query`
    Remove { query: Record },

    /// Fetch the whole collection, optionally flattened into one array
    Get { flatten: bool },

    /// Find every record matching `query`
    Search { query: Record },

    /// Any other method. The value is carried as raw JSON, untouched.
    Opaque { method: String, value: Box<RawValue> },
}

impl Command {
    pub fn insert(record: Record) -> Self {
        Command::Insert { record }
    }

    pub fn insert_many(records: Vec<Record>) -> Self {
        Command::InsertMany { records }
    }

    pub fn update(filter: Record, changes: Record) -> Self {
        Command::Update { filter, changes }
    }

    pub fn remove(query: Record) -> Self {
        Command::Remove { query }
    }

    pub fn get(flatten: bool) -> Self {
        Command::Get { flatten }
    }

    pub fn search(query: Record) -> Self {
        Command::Search { query }
    }

    /// Build a command for a method this crate does not model.
    ///
    /// `value` must be valid JSON text.
    pub fn opaque(method: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let value = RawValue::from_string(value.into())?;
        Ok(Command::Opaque {
            method: method.into(),
            value,
        })
    }

    /// Wire name of the method
    pub fn method(&self) -> &str {
        match self {
            Command::Opaque { method, .. } => method,
            _ => self.kind().map(|m| m.as_str()).unwrap_or_default(),
        }
    }

    /// The known method, `None` for opaque commands
    pub fn kind(&self) -> Option<Method> {
        match self {
            Command::Insert { .. } => Some(Method::Insert),
            Command::InsertMany { .. } => Some(Method::InsertMany),
            Command::Update { .. } => Some(Method::Update),
            Command::Remove { .. } => Some(Method::Remove),
            Command::Get { .. } => Some(Method::Get),
            Command::Search { .. } => Some(Method::Search),
            Command::Opaque { .. } => None,
        }
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Command::Insert { record: a }, Command::Insert { record: b }) => a == b,
            (Command::InsertMany { records: a }, Command::InsertMany { records: b }) => a == b,
            (
                Command::Update { filter: fa, changes: ca },
                Command::Update { filter: fb, changes: cb },
            ) => fa == fb && ca == cb,
            (Command::Remove { query: a }, Command::Remove { query: b }) => a == b,
            (Command::Get { flatten: a }, Command::Get { flatten: b }) => a == b,
            (Command::Search { query: a }, Command::Search { query: b }) => a == b,
            (
                Command::Opaque { method: ma, value: va },
                Command::Opaque { method: mb, value: vb },
            ) => ma == mb && va.get() == vb.get(),
            _ => false,
        }
    }
}
