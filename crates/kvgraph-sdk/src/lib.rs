//! Client object model for kvgraph.
//!
//! Items and relations are addressed by collection and key, carry the
//! server-assigned content ref of their last response, and perform their
//! remote operations through a pluggable [`Transport`]. This is the main
//! entry point for applications talking to a kvgraph API.
//!
//! ```
//! use std::sync::Arc;
//! use kvgraph_sdk::{Client, ClientConfig, MemoryTransport};
//!
//! let transport = Arc::new(MemoryTransport::new());
//! let client = Client::new(ClientConfig::default(), transport.clone());
//!
//! let ann = client.item("users", "ann");
//! let bob = client.item("users", "bob");
//! let mut follows = client.relation(&ann, "follows", &bob);
//!
//! let outcome = follows.put().unwrap();
//! assert!(outcome.success);
//! assert_eq!(
//!     transport.last_request().unwrap().path,
//!     "users/ann/relation/follows/users/bob"
//! );
//! ```

pub mod client;
pub mod connection;
pub mod entity;
pub mod error;
pub mod key_value;
pub mod relation;
pub mod response;

pub use client::Client;
pub use connection::Connection;
pub use entity::VersionedEntity;
pub use error::{SdkError, SdkResult};
pub use key_value::KeyValue;
pub use relation::{Relation, RelationState};
pub use response::{Outcome, ResponseState};

// Re-export key types
pub use kvgraph_protocol::{ClientConfig, MemoryTransport, Method, Request, Response, Transport};
pub use kvgraph_refs::{Endpoint, RefAddress};
pub use kvgraph_types::{ScopedStorage, Value, ValueModel};
