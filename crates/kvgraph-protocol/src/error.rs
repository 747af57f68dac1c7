use std::time::Duration;

use thiserror::Error;

/// Failures of the transport itself: the request never produced a usable
/// HTTP response. Non-2xx responses are not errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("transport state poisoned: {0}")]
    Poisoned(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
