//! The [`Transport`] trait and the authenticating decorator.
//!
//! A transport performs one blocking request/response round trip per call.
//! Retries, connection pooling and timeouts are its business; the entity
//! layer only interprets the status code and the `ETag` header.

use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ProtocolResult;
use crate::request::{Request, Response};

/// The HTTP collaborator every remote-backed entity talks through.
pub trait Transport: Send + Sync {
    /// Perform `request` and return the response, whatever its status.
    ///
    /// Only failures to obtain a response are errors.
    fn request(&self, request: Request) -> ProtocolResult<Response>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn request(&self, request: Request) -> ProtocolResult<Response> {
        (**self).request(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn request(&self, request: Request) -> ProtocolResult<Response> {
        (**self).request(request)
    }
}

/// Adds the configured `Authorization` and `User-Agent` headers to every
/// request before handing it to the inner transport. Headers already present
/// on the request win.
#[derive(Debug)]
pub struct AuthenticatedTransport<T> {
    inner: T,
    authorization: Option<String>,
    user_agent: String,
}

impl<T: Transport> AuthenticatedTransport<T> {
    pub fn new(inner: T, config: &ClientConfig) -> Self {
        Self {
            inner,
            authorization: config.auth().authorization_header(),
            user_agent: config.user_agent.clone(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Transport> Transport for AuthenticatedTransport<T> {
    fn request(&self, mut request: Request) -> ProtocolResult<Response> {
        if let Some(authorization) = &self.authorization {
            if request.header("Authorization").is_none() {
                request
                    .headers
                    .insert("Authorization".into(), authorization.clone());
            }
        }
        if request.header("User-Agent").is_none() {
            request
                .headers
                .insert("User-Agent".into(), self.user_agent.clone());
        }
        debug!(
            method = %request.method,
            target = %request.target(),
            authenticated = self.authorization.is_some(),
            "dispatching request"
        );
        self.inner.request(request)
    }
}
