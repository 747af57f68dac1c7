//! Value model for the kvgraph client.
//!
//! This crate provides the schemaless document types every remote-backed
//! entity is built on. Every other kvgraph crate depends on `kvgraph-types`.
//!
//! # Key Types
//!
//! - [`Value`] — Tagged union of scalars, sequences, and nested records
//! - [`ScopedStorage`] — String-keyed field container with reset
//! - [`ValueModel`] — A JSON document with deep merge, partial bulk replace,
//!   copy-out snapshots, and JMESPath extraction
//! - [`IntoRecord`] — Root data accepted by merge and bulk replace
//! - [`TypeError`] — Invalid-structure and query failures

pub mod error;
pub mod model;
pub mod query;
pub mod storage;
pub mod value;

pub use error::{TypeError, TypeResult};
pub use model::{IntoRecord, ValueModel};
pub use storage::ScopedStorage;
pub use value::Value;
