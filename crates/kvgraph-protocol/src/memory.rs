//! In-memory transport for testing and offline use.
//!
//! [`MemoryTransport`] records every request it receives and answers from a
//! queue of scripted responses, falling back to a default response once the
//! queue is empty. It never touches the network.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{ProtocolError, ProtocolResult};
use crate::request::{Request, Response};
use crate::transport::Transport;

/// A recording, scriptable [`Transport`].
#[derive(Debug)]
pub struct MemoryTransport {
    state: Mutex<MemoryState>,
}

#[derive(Debug)]
struct MemoryState {
    requests: Vec<Request>,
    scripted: VecDeque<ProtocolResult<Response>>,
    fallback: Response,
}

impl MemoryTransport {
    /// A transport answering `200 OK` to everything.
    pub fn new() -> Self {
        Self::with_default_response(Response::new(200))
    }

    /// A transport answering `response` once the script is exhausted.
    pub fn with_default_response(response: Response) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                requests: Vec::new(),
                scripted: VecDeque::new(),
                fallback: response,
            }),
        }
    }

    /// Queue a response for the next unanswered request.
    pub fn push_response(&self, response: Response) {
        self.lock().scripted.push_back(Ok(response));
    }

    /// Queue a transport failure for the next unanswered request.
    pub fn fail_next(&self, error: ProtocolError) {
        self.lock().scripted.push_back(Err(error));
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.lock().requests.last().cloned()
    }

    /// Inspection must keep working after a panicking test thread.
    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MemoryTransport {
    fn request(&self, request: Request) -> ProtocolResult<Response> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| ProtocolError::Poisoned(e.to_string()))?;
        state.requests.push(request);
        match state.scripted.pop_front() {
            Some(result) => result,
            None => Ok(state.fallback.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    #[test]
    fn records_requests_in_order() {
        let transport = MemoryTransport::new();
        transport.request(Request::new(Method::Put, "a/1")).unwrap();
        transport.request(Request::new(Method::Delete, "a/2")).unwrap();

        let seen = transport.requests();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].method, Method::Put);
        assert_eq!(seen[1].path, "a/2");
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn scripted_then_fallback() {
        let transport = MemoryTransport::with_default_response(Response::new(204));
        transport.push_response(Response::new(404));

        let first = transport.request(Request::new(Method::Get, "x")).unwrap();
        let second = transport.request(Request::new(Method::Get, "x")).unwrap();
        assert_eq!(first.status_code, 404);
        assert_eq!(second.status_code, 204);
    }

    #[test]
    fn scripted_failure() {
        let transport = MemoryTransport::new();
        transport.fail_next(ProtocolError::Timeout(std::time::Duration::from_secs(1)));

        let err = transport.request(Request::new(Method::Get, "x")).unwrap_err();
        assert!(matches!(err, ProtocolError::Timeout(_)));
        // The failed request is still recorded.
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn empty_transport() {
        let transport = MemoryTransport::default();
        assert_eq!(transport.request_count(), 0);
        assert!(transport.last_request().is_none());
    }
}
