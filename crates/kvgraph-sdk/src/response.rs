//! What an entity remembers about its last remote call.

use kvgraph_protocol::Response;
use kvgraph_types::ValueModel;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The result of one remote operation.
///
/// A non-2xx status is reported here with `success == false`; it is never
/// an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub status_code: u16,
    pub success: bool,
    /// The entity's ref after the call, if it has one.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub ref_: Option<String>,
}

/// Status, reason and decoded body of the most recent response, overwritten
/// on every call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseState {
    status_code: Option<u16>,
    status: Option<String>,
    success: bool,
    body: ValueModel,
}

impl ResponseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the state from `response`.
    ///
    /// Only record-shaped bodies are kept; anything else leaves the body
    /// empty.
    pub fn record(&mut self, response: &Response) {
        self.status_code = Some(response.status_code);
        self.status = response.reason.clone();
        self.success = response.is_success();
        self.body = match response.json() {
            Some(body) => ValueModel::from_json(body).unwrap_or_else(|err| {
                debug!(error = %err, "discarding non-record response body");
                ValueModel::new()
            }),
            None => ValueModel::new(),
        };
    }

    /// `None` until the first call.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// The reason phrase, when the transport reported one.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn body(&self) -> &ValueModel {
        &self.body
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
