use kvgraph_protocol::ProtocolError;
use kvgraph_refs::RefError;
use kvgraph_types::TypeError;
use thiserror::Error;

/// Errors raised by entity operations.
///
/// Non-2xx responses are not errors; they come back as an
/// [`Outcome`](crate::Outcome) with `success == false`.
#[derive(Debug, Error)]
pub enum SdkError {
    /// A required field was read before it was set. Always a caller bug.
    #[error("{0}")]
    Precondition(String),

    /// Input data has a shape the object model cannot hold.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    /// The transport failed to produce a response. Passed through unchanged.
    #[error(transparent)]
    Transport(#[from] ProtocolError),
}

impl SdkError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, SdkError::Precondition(_))
    }

    pub fn is_invalid_structure(&self) -> bool {
        matches!(self, SdkError::InvalidStructure(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, SdkError::Transport(_))
    }
}

impl From<RefError> for SdkError {
    fn from(err: RefError) -> Self {
        if err.is_missing() {
            SdkError::Precondition(err.to_string())
        } else {
            SdkError::InvalidStructure(err.to_string())
        }
    }
}

impl From<TypeError> for SdkError {
    fn from(err: TypeError) -> Self {
        SdkError::InvalidStructure(err.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_precondition() {
        let err: SdkError = RefError::Missing { field: "kind" }.into();
        assert!(err.is_precondition());
        assert_eq!(err.to_string(), "there is no kind set yet");
    }

    #[test]
    fn bad_segment_is_invalid_structure() {
        let err: SdkError = RefError::InvalidSegment {
            field: "key",
            value: "a/b".into(),
            reason: "contains '/'".into(),
        }
        .into();
        assert!(err.is_invalid_structure());
    }

    #[test]
    fn type_errors_are_invalid_structure() {
        let err: SdkError = TypeError::IndexedRoot { key: "0".into() }.into();
        assert!(err.is_invalid_structure());
    }

    #[test]
    fn transport_errors_pass_through() {
        let err: SdkError = ProtocolError::Connection("refused".into()).into();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "connection failed: refused");
    }
}
