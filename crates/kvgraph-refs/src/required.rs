//! A named optional value with a fail-fast accessor.
//!
//! Identity fields (collection, key, ref, edge kind, the transport) are all
//! optional until set, but building a remote request with one of them
//! missing would produce a malformed path. [`Required::require`] turns that
//! into a [`RefError::Missing`] before any I/O happens.

use crate::error::{RefError, Result};

/// An optional value that knows its own field name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Required<T> {
    name: &'static str,
    value: Option<T>,
}

impl<T> Required<T> {
    /// Create an unset field called `name`.
    pub const fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }

    /// The field name used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The current value, if any.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The current value, or [`RefError::Missing`] if unset.
    pub fn require(&self) -> Result<&T> {
        self.value
            .as_ref()
            .ok_or(RefError::Missing { field: self.name })
    }

    pub fn set(&mut self, value: T) -> &mut Self {
        self.value = Some(value);
        self
    }

    /// Replace the value wholesale, including with `None`.
    pub fn replace(&mut self, value: Option<T>) -> Option<T> {
        std::mem::replace(&mut self.value, value)
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn clear(&mut self) {
        self.value = None;
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }
}

impl Required<String> {
    /// Store a string; the empty string counts as unset.
    pub fn set_str(&mut self, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        self.value = (!value.is_empty()).then_some(value);
        self
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn require_str(&self) -> Result<&str> {
        self.require().map(String::as_str)
    }
}
