//! Error types shared by the map and its consumers.

use thiserror::Error;

/// Failures reported by [`ChainedHashMap`](crate::ChainedHashMap).
///
/// Every failure is local and deterministic: the same key against the
/// same table state yields the same error.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MapError {
    /// `get`, `get_mut` or `remove` was called with a key that is not stored.
    #[error("key not found")]
    KeyNotFound,
    /// A table cannot have zero buckets.
    #[error("invalid capacity {0}: a table needs at least one bucket")]
    InvalidCapacity(usize),
    /// A load or shrink limit outside its valid range.
    #[error("invalid load limit {0}")]
    InvalidLoadLimit(f64),
}

/// A line the query menu could not turn into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{0} invalid. Please enter a command and a word.")]
    Invalid(String),
}
