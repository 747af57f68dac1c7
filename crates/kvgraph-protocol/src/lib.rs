//! Transport contract for the kvgraph client.
//!
//! Defines what the entity layer needs from HTTP: request and response
//! values, the blocking [`Transport`] trait, request path building, the JSON
//! wire form of relations, authentication, and client configuration. A
//! concrete HTTP client is plugged in by implementing [`Transport`];
//! [`MemoryTransport`] is provided for tests.

pub mod auth;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod memory;
pub mod request;
pub mod transport;
pub mod wire;

pub use auth::AuthMethod;
pub use config::{ClientConfig, API_KEY_ENV, API_URL_ENV};
pub use endpoint::endpoints;
pub use error::{ProtocolError, ProtocolResult};
pub use memory::MemoryTransport;
pub use request::{Method, Request, Response};
pub use transport::{AuthenticatedTransport, Transport};
pub use wire::{EndpointWire, RelationshipWire, ITEM_KIND, RELATIONSHIP_KIND};
