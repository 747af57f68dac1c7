//! A minimal named-property container.
//!
//! [`ScopedStorage`] is the substrate every document and entity uses to hold
//! dynamic fields. Keys are strings by construction; ordering is only
//! relevant to display and serialization.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::value::Value;

/// String-keyed field storage with controlled read, write and reset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopedStorage {
    fields: BTreeMap<String, Value>,
}

impl ScopedStorage {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a field. `None` means the field is unset.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Write a field, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Unset a single field, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    /// Clear every field, leaving the container reusable.
    pub fn reset(&mut self) -> &mut Self {
        self.fields.clear();
        self
    }

    pub(crate) fn entry(&mut self, key: String) -> btree_map::Entry<'_, String, Value> {
        self.fields.entry(key)
    }
}

impl IntoIterator for ScopedStorage {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScopedStorage {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<(String, Value)> for ScopedStorage {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
