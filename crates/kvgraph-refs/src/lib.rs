//! Addressing for kvgraph entities.
//!
//! Every remote-backed entity is identified by a collection, a key within
//! that collection, and an opaque content version ("ref") assigned by the
//! server. Refs are the optimistic-concurrency tokens of the system: a ref
//! read earlier can be handed to a conditional write, and the server rejects
//! the write if the stored version has moved on.
//!
//! # Modules
//!
//! - [`error`] — Error types for addressing
//! - [`required`] — [`Required`], a named optional value with a fail-fast accessor
//! - [`address`] — [`RefAddress`] and `ETag` parsing
//! - [`traits`] — The [`Endpoint`] trait
//! - [`names`] — Path segment validation

pub mod address;
pub mod error;
pub mod names;
pub mod required;
pub mod traits;

pub use address::{parse_etag, RefAddress};
pub use error::{RefError, Result};
pub use names::validate_path_segment;
pub use required::Required;
pub use traits::Endpoint;
