//! Error types for addressing operations.

use thiserror::Error;

/// Errors that can occur while reading or building an entity address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefError {
    /// A required identity field was read before it was set.
    #[error("there is no {field} set yet")]
    Missing { field: &'static str },

    /// A value cannot be used as a request path segment.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidSegment {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl RefError {
    /// Returns `true` for precondition violations (unset required fields).
    pub fn is_missing(&self) -> bool {
        matches!(self, RefError::Missing { .. })
    }
}

/// Convenience type alias for addressing operations.
pub type Result<T> = std::result::Result<T, RefError>;
