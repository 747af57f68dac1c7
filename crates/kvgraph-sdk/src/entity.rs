//! [`VersionedEntity`]: an address plus the outcome of its last remote call.
//!
//! Every remote-backed entity embeds one. It owns the round trip: the
//! transport is fetched (failing fast if unset), the request is sent, the
//! status is recorded, and a ref is captured from the `ETag` header when the
//! server sends one. Transport errors are returned unchanged.
//!
//! An entity mirrors its last outcome on the instance as well as returning
//! it, so it is meant for single-owner, single-thread use.

use std::sync::Arc;

use kvgraph_protocol::{Request, Response, Transport};
use kvgraph_refs::RefAddress;
use tracing::debug;

use crate::connection::Connection;
use crate::error::SdkResult;
use crate::response::{Outcome, ResponseState};

/// Address, transport and last-call state of one remote entity.
#[derive(Clone, Debug, Default)]
pub struct VersionedEntity {
    address: RefAddress,
    connection: Connection,
    last: ResponseState,
}

impl VersionedEntity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            connection: Connection::with_transport(transport),
            ..Self::default()
        }
    }

    pub fn address(&self) -> &RefAddress {
        &self.address
    }

    pub fn address_mut(&mut self) -> &mut RefAddress {
        &mut self.address
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) -> &mut Self {
        self.connection.set_transport(transport);
        self
    }

    pub fn last(&self) -> &ResponseState {
        &self.last
    }

    pub fn status_code(&self) -> Option<u16> {
        self.last.status_code()
    }

    /// Whether the last call got a 2xx response.
    pub fn success(&self) -> bool {
        self.last.success()
    }

    pub fn ref_(&self) -> Option<&str> {
        self.address.ref_()
    }

    /// Perform one round trip and record its outcome.
    pub fn send(&mut self, request: Request) -> SdkResult<(Outcome, Response)> {
        let transport = self.connection.require_transport()?;
        let method = request.method;
        let target = request.target();

        let response = transport.request(request)?;

        let captured = response
            .etag()
            .is_some_and(|etag| self.address.set_ref_from_etag(etag));
        self.last.record(&response);

        debug!(
            %method,
            %target,
            status = response.status_code,
            success = self.last.success(),
            captured_ref = captured,
            "request completed"
        );

        let outcome = Outcome {
            status_code: response.status_code,
            success: self.last.success(),
            ref_: self.address.ref_().map(str::to_string),
        };
        Ok((outcome, response))
    }

    /// Clear the address and the last-call state. The transport is kept.
    pub fn reset(&mut self) {
        self.address.reset();
        self.last.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvgraph_protocol::{Method, MemoryTransport, ProtocolError};
    use serde_json::json;

    fn entity_with(spy: &Arc<MemoryTransport>) -> VersionedEntity {
        let mut entity = VersionedEntity::with_transport(spy.clone());
        entity.address_mut().set_collection("users").set_key("1");
        entity
    }

    #[test]
    fn send_without_transport_is_precondition() {
        let mut entity = VersionedEntity::new();
        let err = entity
            .send(Request::new(Method::Get, "users/1"))
            .unwrap_err();
        assert!(err.is_precondition());
        assert!(entity.status_code().is_none());
    }

    #[test]
    fn send_records_status() {
        let spy = Arc::new(MemoryTransport::new());
        spy.push_response(Response::new(201));
        let mut entity = entity_with(&spy);

        let (outcome, _) = entity.send(Request::new(Method::Put, "users/1")).unwrap();
        assert_eq!(outcome.status_code, 201);
        assert!(outcome.success);
        assert!(outcome.ref_.is_none());
        assert_eq!(entity.status_code(), Some(201));
        assert!(entity.success());
    }

    #[test]
    fn non_2xx_is_data_not_error() {
        let spy = Arc::new(MemoryTransport::new());
        spy.push_response(Response::new(412).with_reason("Precondition Failed"));
        let mut entity = entity_with(&spy);

        let (outcome, response) = entity.send(Request::new(Method::Put, "users/1")).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.status_code, 412);
        assert_eq!(response.reason.as_deref(), Some("Precondition Failed"));
        assert_eq!(entity.last().status(), Some("Precondition Failed"));
    }

    #[test]
    fn etag_is_captured_without_quotes() {
        let spy = Arc::new(MemoryTransport::new());
        spy.push_response(Response::new(201).with_header("ETag", "\"82eafab14dc84ed3\""));
        let mut entity = entity_with(&spy);

        let (outcome, _) = entity.send(Request::new(Method::Put, "users/1")).unwrap();
        assert_eq!(outcome.ref_.as_deref(), Some("82eafab14dc84ed3"));
        assert_eq!(entity.ref_(), Some("82eafab14dc84ed3"));
    }

    #[test]
    fn missing_etag_keeps_previous_ref() {
        let spy = Arc::new(MemoryTransport::new());
        spy.push_response(Response::new(200).with_header("ETag", "\"r1\""));
        spy.push_response(Response::new(200));
        let mut entity = entity_with(&spy);

        entity.send(Request::new(Method::Get, "users/1")).unwrap();
        entity.send(Request::new(Method::Get, "users/1")).unwrap();
        assert_eq!(entity.ref_(), Some("r1"));
    }

    #[test]
    fn transport_error_propagates_unchanged() {
        let spy = Arc::new(MemoryTransport::new());
        spy.fail_next(ProtocolError::MalformedResponse("truncated".into()));
        let mut entity = entity_with(&spy);

        let err = entity.send(Request::new(Method::Get, "users/1")).unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "malformed response: truncated");
        assert!(entity.status_code().is_none());
    }

    #[test]
    fn response_body_is_kept() {
        let spy = Arc::new(MemoryTransport::new());
        spy.push_response(Response::new(200).with_body(json!({"name": "ann"})));
        let mut entity = entity_with(&spy);

        entity.send(Request::new(Method::Get, "users/1")).unwrap();
        assert_eq!(entity.last().body().to_json(), json!({"name": "ann"}));
    }

    #[test]
    fn reset_keeps_transport() {
        let spy = Arc::new(MemoryTransport::new());
        spy.push_response(Response::new(200).with_header("ETag", "\"r1\""));
        let mut entity = entity_with(&spy);
        entity.send(Request::new(Method::Get, "users/1")).unwrap();

        entity.reset();
        assert!(entity.address().collection().is_none());
        assert!(entity.ref_().is_none());
        assert!(entity.status_code().is_none());
        assert!(!entity.success());
        assert!(entity.connection().is_connected());
    }
}
