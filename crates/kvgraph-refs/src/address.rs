//! The (collection, key, ref) identity shared by every remote-backed entity.
//!
//! `collection` and `key` are chosen by the caller. `ref` is the opaque
//! content version assigned by the server; after a remote call it only ever
//! arrives through [`RefAddress::set_ref_from_etag`].

use tracing::debug;

use crate::error::Result;
use crate::required::Required;
use crate::traits::Endpoint;

/// Collection + key + content ref of one stored item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefAddress {
    collection: Required<String>,
    key: Required<String>,
    reference: Required<String>,
}

impl Default for RefAddress {
    fn default() -> Self {
        Self {
            collection: Required::new("collection"),
            key: Required::new("key"),
            reference: Required::new("ref"),
        }
    }
}

impl RefAddress {
    /// Create an empty address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an address pointing at `collection`/`key`, with no ref yet.
    pub fn at(collection: impl Into<String>, key: impl Into<String>) -> Self {
        let mut address = Self::new();
        address.set_collection(collection).set_key(key);
        address
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn require_collection(&self) -> Result<&str> {
        self.collection.require_str()
    }

    pub fn set_collection(&mut self, collection: impl Into<String>) -> &mut Self {
        self.collection.set_str(collection);
        self
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn require_key(&self) -> Result<&str> {
        self.key.require_str()
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key.set_str(key);
        self
    }

    /// The content ref, if one has been received.
    pub fn ref_(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn require_ref(&self) -> Result<&str> {
        self.reference.require_str()
    }

    /// Store a ref verbatim. Used when hydrating from a decoded payload that
    /// already carries the server's ref.
    pub fn set_ref(&mut self, reference: impl Into<String>) -> &mut Self {
        self.reference.set_str(reference);
        self
    }

    /// Store the ref carried by an `ETag` response header.
    ///
    /// Returns `true` if a ref was captured. A blank header leaves the
    /// current ref untouched.
    pub fn set_ref_from_etag(&mut self, etag: &str) -> bool {
        match parse_etag(etag) {
            Some(reference) => {
                debug!(ref_ = reference, "captured ref from ETag");
                self.reference.set_str(reference);
                true
            }
            None => false,
        }
    }

    /// Clear collection, key and ref.
    pub fn reset(&mut self) {
        self.collection.clear();
        self.key.clear();
        self.reference.clear();
    }
}

impl Endpoint for RefAddress {
    fn collection(&self) -> Option<&str> {
        RefAddress::collection(self)
    }

    fn key(&self) -> Option<&str> {
        RefAddress::key(self)
    }
}

/// Extract the opaque token from an `ETag` header value.
///
/// Surrounding quotes and a weak-validator `W/` prefix are stripped.
///
/// # Examples
///
/// ```
/// use kvgraph_refs::address::parse_etag;
///
/// assert_eq!(parse_etag("\"82eafab14dc84ed3\""), Some("82eafab14dc84ed3"));
/// assert_eq!(parse_etag("W/\"abc\""), Some("abc"));
/// assert_eq!(parse_etag("\"\""), None);
/// ```
pub fn parse_etag(value: &str) -> Option<&str> {
    let value = value.trim();
    let value = value.strip_prefix("W/").unwrap_or(value);
    let token = value.trim_matches('"');
    (!token.is_empty()).then_some(token)
}
