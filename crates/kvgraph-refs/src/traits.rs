//! The [`Endpoint`] trait: the minimal capability an edge needs from the
//! items it connects.
//!
//! Anything that can name a collection and a key can be the source or the
//! destination of a relation. The relation copies the address and never
//! owns the item's body.

use crate::error::{RefError, Result};

/// Something addressable by collection and key.
pub trait Endpoint {
    fn collection(&self) -> Option<&str>;

    fn key(&self) -> Option<&str>;

    /// The collection, or [`RefError::Missing`] if unset.
    fn require_collection(&self) -> Result<&str> {
        self.collection()
            .ok_or(RefError::Missing { field: "collection" })
    }

    /// The key, or [`RefError::Missing`] if unset.
    fn require_key(&self) -> Result<&str> {
        self.key().ok_or(RefError::Missing { field: "key" })
    }
}
