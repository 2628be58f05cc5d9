//! Error type shared by every collection in the crate
//!
//! All conditions are local and synchronous: they are raised where they are
//! detected and handed back to the immediate caller unchanged. Lookups that
//! can legitimately have no answer (a search miss, an A* query without a
//! path) return `Option` instead of an error.

use std::fmt;

/// Error type for collection operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An index outside the valid range was used for access or mutation
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// The number of elements at the time of the call
        len: usize,
    },
    /// A removal or peek was attempted on a collection without elements
    EmptyCollection,
    /// The key (rendered with `Debug`) is not present
    KeyNotFound(String),
    /// The key (rendered with `Debug`) is already present
    DuplicateKey(String),
    /// No element equal to the value (rendered with `Debug`) exists
    ValueNotFound(String),
    /// The structure is not in a state that allows the operation
    IllegalState(String),
    /// The collection does not support the named operation
    Unsupported(&'static str),
    /// A constructor parameter was rejected
    InvalidConfig(String),
}

impl CollectionError {
    pub(crate) fn key_not_found(key: &impl fmt::Debug) -> Self {
        CollectionError::KeyNotFound(format!("{key:?}"))
    }

    pub(crate) fn duplicate_key(key: &impl fmt::Debug) -> Self {
        CollectionError::DuplicateKey(format!("{key:?}"))
    }
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for length {len}")
            }
            CollectionError::EmptyCollection => write!(f, "collection is empty"),
            CollectionError::KeyNotFound(key) => write!(f, "Key {key} is not found."),
            CollectionError::DuplicateKey(key) => write!(f, "Key {key} already exists."),
            CollectionError::ValueNotFound(value) => write!(f, "Value {value} is not found."),
            CollectionError::IllegalState(msg) => f.write_str(msg),
            CollectionError::Unsupported(op) => write!(f, "{op} is not supported"),
            CollectionError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for CollectionError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CollectionError>;
