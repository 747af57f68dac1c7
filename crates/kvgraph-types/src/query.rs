//! Structural path queries over JSON documents.
//!
//! Evaluation is delegated to the `jmespath` crate; this module is the only
//! place that touches it.

use std::fmt;

use crate::error::{TypeError, TypeResult};

/// Evaluate a JMESPath expression against `document`.
///
/// Returns `Ok(None)` when the expression matches nothing. Only a malformed
/// expression is an error.
///
/// # Examples
///
/// ```
/// use kvgraph_types::query::evaluate;
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": "five"}});
/// assert_eq!(evaluate("a.b", &doc).unwrap(), Some(json!("five")));
/// assert_eq!(evaluate("a.c", &doc).unwrap(), None);
/// ```
pub fn evaluate(
    expression: &str,
    document: &serde_json::Value,
) -> TypeResult<Option<serde_json::Value>> {
    let compiled = jmespath::compile(expression).map_err(|e| query_error(expression, e))?;
    let result = compiled
        .search(document.clone())
        .map_err(|e| query_error(expression, e))?;

    if result.is_null() {
        return Ok(None);
    }

    serde_json::to_value(&*result)
        .map(Some)
        .map_err(|e| query_error(expression, e))
}

fn query_error(expression: &str, reason: impl fmt::Display) -> TypeError {
    TypeError::Query {
        expression: expression.to_string(),
        reason: reason.to_string(),
    }
}
