use thiserror::Error;

/// Errors produced by value model operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// An integer-like key was found at the root of a record.
    #[error("indexed arrays are not allowed at the root of a record (key {key:?})")]
    IndexedRoot { key: String },

    /// Root data was not record-shaped.
    #[error("expected a record at the root, found {found}")]
    NotARecord { found: &'static str },

    /// The path expression could not be compiled or evaluated.
    #[error("invalid path expression {expression:?}: {reason}")]
    Query { expression: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience type alias for value model operations.
pub type TypeResult<T> = Result<T, TypeError>;
