//! Path segment validation.
//!
//! Collections, keys and relation kinds are spliced verbatim into request
//! paths such as `users/1/relation/follows/users/2`. A valid segment:
//! - Must be non-empty
//! - Must not contain `/`, `?` or `#`
//! - Must not contain control characters

use crate::error::{RefError, Result};

/// Characters that would change the meaning of the request target.
const FORBIDDEN_CHARS: &[char] = &['/', '?', '#'];

/// Validate a value used as a single request path segment.
///
/// `field` names the value in the error (e.g. `"collection"`).
///
/// # Examples
///
/// ```
/// use kvgraph_refs::names::validate_path_segment;
///
/// assert!(validate_path_segment("collection", "users").is_ok());
/// assert!(validate_path_segment("key", "a b-c_d.e").is_ok());
/// assert!(validate_path_segment("key", "").is_err());
/// assert!(validate_path_segment("key", "a/b").is_err());
/// ```
pub fn validate_path_segment(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(RefError::InvalidSegment {
            field,
            value: value.to_string(),
            reason: "must not be empty".into(),
        });
    }

    for ch in FORBIDDEN_CHARS {
        if value.contains(*ch) {
            return Err(RefError::InvalidSegment {
                field,
                value: value.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }

    if let Some(ch) = value.chars().find(|c| c.is_control()) {
        return Err(RefError::InvalidSegment {
            field,
            value: value.to_string(),
            reason: format!("contains control character: {ch:?}"),
        });
    }

    Ok(())
}
