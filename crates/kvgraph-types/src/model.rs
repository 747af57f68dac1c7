//! Schemaless JSON documents with deep merge and path extraction.
//!
//! A [`ValueModel`] represents one document: an item's body, a relation's
//! materialized form, a decoded response. Root data must be record-shaped:
//! JSON arrays, scalars, and integer-like keys are rejected at the root with
//! [`TypeError`]. Nested levels accept any string key.

use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::query;
use crate::storage::ScopedStorage;
use crate::value::Value;

/// A record-shaped document built on [`ScopedStorage`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub struct ValueModel {
    storage: ScopedStorage,
}

/// Root data accepted by [`ValueModel::set_value`] and
/// [`ValueModel::merge_value`].
pub trait IntoRecord {
    /// Convert into a record, rejecting indexed or non-record roots.
    fn into_record(self) -> TypeResult<ValueModel>;
}

impl ValueModel {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from root data, applying the root checks.
    pub fn from_json(data: impl IntoRecord) -> TypeResult<Self> {
        data.into_record()
    }

    /// Nested objects skip the root checks.
    pub(crate) fn from_map_unchecked(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            storage: map
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.storage.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.storage.get_mut(key)
    }

    /// Write a single field. JSON objects passed in are normalized to records.
    ///
    /// Integer-like keys are rejected here at every level: any record can
    /// later be handed to [`set_value`](Self::set_value) or serialized as a
    /// root, and must stay loadable.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> TypeResult<&mut Self> {
        let key = key.into();
        if is_indexed_key(&key) {
            return Err(TypeError::IndexedRoot { key });
        }
        self.storage.set(key, value);
        Ok(self)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.storage.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.storage.contains(key)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.storage.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.storage.iter()
    }

    /// The underlying field storage.
    pub fn storage(&self) -> &ScopedStorage {
        &self.storage
    }

    /// Evaluate a JMESPath expression against this document.
    ///
    /// Returns `Ok(None)` when nothing matches. Array results come back as
    /// [`Value::Sequence`] and object results as [`Value::Record`].
    pub fn extract_value(&self, expression: &str) -> TypeResult<Option<Value>> {
        Ok(query::evaluate(expression, &self.to_json())?.map(Value::from))
    }

    /// Recursively merge `other` into this document.
    ///
    /// Where both sides hold a record the two are merged field by field;
    /// anywhere else the incoming value replaces the current one. Sequences
    /// are never concatenated.
    pub fn merge_value(&mut self, other: impl IntoRecord) -> TypeResult<&mut Self> {
        let other = other.into_record()?;
        self.merge_record(other);
        Ok(self)
    }

    fn merge_record(&mut self, other: ValueModel) {
        for (key, incoming) in other.storage {
            match self.storage.entry(key) {
                Entry::Occupied(mut slot) => match (slot.get_mut(), incoming) {
                    (Value::Record(current), Value::Record(incoming)) => {
                        current.merge_record(incoming)
                    }
                    (current, incoming) => *current = incoming,
                },
                Entry::Vacant(slot) => {
                    slot.insert(incoming);
                }
            }
        }
    }

    /// Replace each top-level field named in `values`; other fields are left
    /// untouched.
    pub fn set_value(&mut self, values: impl IntoRecord) -> TypeResult<&mut Self> {
        let values = values.into_record()?;
        for (key, value) in values.storage {
            self.storage.set(key, value);
        }
        Ok(self)
    }

    /// An independent copy of the whole document.
    pub fn get_value(&self) -> ValueModel {
        let mut fresh = ValueModel::new();
        fresh.merge_record(self.clone());
        fresh
    }

    /// Clear every document field.
    pub fn reset_value(&mut self) -> &mut Self {
        self.storage.reset();
        self
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.storage
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }

    pub fn to_json_string(&self) -> TypeResult<String> {
        serde_json::to_string(&self.to_json()).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

/// Integer-like keys are the ones a decoder would treat as array indices:
/// canonical decimal integers such as `"0"`, `"17"` or `"-3"`.
fn is_indexed_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if key == "0" {
        return true;
    }
    !digits.starts_with('0') && key.parse::<i64>().is_ok()
}

fn check_root_keys<'a>(mut keys: impl Iterator<Item = &'a str>) -> TypeResult<()> {
    match keys.find(|key| is_indexed_key(key)) {
        Some(key) => Err(TypeError::IndexedRoot {
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}

impl IntoRecord for ValueModel {
    fn into_record(self) -> TypeResult<ValueModel> {
        check_root_keys(self.keys())?;
        Ok(self)
    }
}

impl IntoRecord for &ValueModel {
    fn into_record(self) -> TypeResult<ValueModel> {
        self.clone().into_record()
    }
}

impl IntoRecord for serde_json::Map<String, serde_json::Value> {
    fn into_record(self) -> TypeResult<ValueModel> {
        check_root_keys(self.keys().map(String::as_str))?;
        Ok(ValueModel::from_map_unchecked(self))
    }
}

impl IntoRecord for serde_json::Value {
    fn into_record(self) -> TypeResult<ValueModel> {
        match self {
            serde_json::Value::Null => Ok(ValueModel::new()),
            serde_json::Value::Object(map) => map.into_record(),
            serde_json::Value::Array(_) => Err(TypeError::NotARecord { found: "array" }),
            serde_json::Value::Bool(_) => Err(TypeError::NotARecord { found: "bool" }),
            serde_json::Value::Number(_) => Err(TypeError::NotARecord { found: "number" }),
            serde_json::Value::String(_) => Err(TypeError::NotARecord { found: "string" }),
        }
    }
}

impl IntoRecord for &serde_json::Value {
    fn into_record(self) -> TypeResult<ValueModel> {
        self.clone().into_record()
    }
}

impl TryFrom<serde_json::Value> for ValueModel {
    type Error = TypeError;

    fn try_from(value: serde_json::Value) -> TypeResult<Self> {
        value.into_record()
    }
}

impl From<ValueModel> for serde_json::Value {
    fn from(model: ValueModel) -> Self {
        model.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn model(data: serde_json::Value) -> ValueModel {
        ValueModel::from_json(data).unwrap()
    }

    #[test]
    fn set_value_then_get_value() {
        let data = json!({"name": "ann", "tags": ["a", "b"], "address": {"city": "x"}});
        let mut doc = ValueModel::new();
        doc.set_value(data.clone()).unwrap();
        assert_eq!(doc.get_value().to_json(), data);
    }

    #[test]
    fn set_value_is_partial() {
        let mut doc = model(json!({"a": 1, "b": {"x": 1}}));
        doc.set_value(json!({"b": {"y": 2}})).unwrap();
        // Named fields are replaced, not merged; unnamed ones survive.
        assert_eq!(doc.to_json(), json!({"a": 1, "b": {"y": 2}}));
    }

    #[test]
    fn merge_records_recursively() {
        let mut doc = model(json!({"a": {"x": 1}}));
        doc.merge_value(json!({"a": {"y": 2}})).unwrap();
        assert_eq!(doc.to_json(), json!({"a": {"x": 1, "y": 2}}));
    }

    #[test]
    fn merge_scalar_overwrites() {
        let mut doc = model(json!({"a": 1}));
        doc.merge_value(json!({"a": 2})).unwrap();
        assert_eq!(doc.to_json(), json!({"a": 2}));
    }

    #[test]
    fn merge_replaces_sequences_wholesale() {
        let mut doc = model(json!({"list": [1, 2, 3]}));
        doc.merge_value(json!({"list": [9]})).unwrap();
        assert_eq!(doc.to_json(), json!({"list": [9]}));
    }

    #[test]
    fn merge_record_over_scalar_and_back() {
        let mut doc = model(json!({"a": 1, "b": {"x": 1}}));
        doc.merge_value(json!({"a": {"nested": true}, "b": "flat"}))
            .unwrap();
        assert_eq!(doc.to_json(), json!({"a": {"nested": true}, "b": "flat"}));
    }

    #[test]
    fn merge_deep_conflict_incoming_wins() {
        let mut doc = model(json!({"a": {"b": {"c": 1, "d": 1}}}));
        doc.merge_value(json!({"a": {"b": {"c": 2}, "e": 3}})).unwrap();
        assert_eq!(doc.to_json(), json!({"a": {"b": {"c": 2, "d": 1}, "e": 3}}));
    }

    #[test]
    fn merge_from_another_model() {
        let mut doc = model(json!({"a": {"x": 1}}));
        let other = model(json!({"a": {"y": 2}, "b": null}));
        doc.merge_value(&other).unwrap();
        assert_eq!(doc.to_json(), json!({"a": {"x": 1, "y": 2}, "b": null}));
    }

    #[test]
    fn merge_rejects_indexed_root() {
        let mut doc = model(json!({"a": 1}));
        let err = doc.merge_value(json!({"0": "zero"})).unwrap_err();
        assert_eq!(err, TypeError::IndexedRoot { key: "0".into() });
        // Nothing was applied.
        assert_eq!(doc.to_json(), json!({"a": 1}));
    }

    #[test]
    fn merge_rejects_array_root() {
        let mut doc = ValueModel::new();
        let err = doc.merge_value(json!([1, 2])).unwrap_err();
        assert_eq!(err, TypeError::NotARecord { found: "array" });
    }

    #[test]
    fn merge_rejects_model_with_indexed_key() {
        let mut map = serde_json::Map::new();
        map.insert("12".into(), json!("x"));
        let indexed = ValueModel::from_map_unchecked(map);
        let mut doc = ValueModel::new();
        assert!(doc.merge_value(indexed).is_err());
    }

    #[test]
    fn set_value_rejects_indexed_root() {
        let mut doc = ValueModel::new();
        let err = doc.set_value(json!({"name": "x", "-3": 1})).unwrap_err();
        assert!(matches!(err, TypeError::IndexedRoot { .. }));
    }

    #[test]
    fn set_value_null_is_noop() {
        let mut doc = model(json!({"a": 1}));
        doc.set_value(serde_json::Value::Null).unwrap();
        assert_eq!(doc.to_json(), json!({"a": 1}));
    }

    #[test]
    fn indexed_key_detection() {
        for key in ["0", "1", "42", "-3", "9223372036854775807"] {
            assert!(is_indexed_key(key), "{key} should be indexed");
        }
        for key in ["", "-", "-0", "01", "1.5", "a1", "1a", " 1", "99999999999999999999"] {
            assert!(!is_indexed_key(key), "{key} should not be indexed");
        }
    }

    #[test]
    fn set_rejects_indexed_key() {
        let mut doc = model(json!({"name": "ann"}));
        let err = doc.set("0", "zero").unwrap_err();
        assert_eq!(err, TypeError::IndexedRoot { key: "0".into() });
        assert_eq!(doc.to_json(), json!({"name": "ann"}));

        doc.set("007", "agent").unwrap();
        let text = doc.to_json_string().unwrap();
        let reloaded: ValueModel = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded, doc);
        assert!(ValueModel::new().set_value(&doc).is_ok());
    }

    #[test]
    fn set_rejects_indexed_key_in_nested_record() {
        let mut doc = model(json!({"profile": {}}));
        let nested = doc
            .get_mut("profile")
            .and_then(Value::as_record_mut)
            .unwrap();
        assert!(nested.set("1", "x").is_err());
        assert!(nested.set("name", "ann").is_ok());
    }

    #[test]
    fn get_value_is_independent() {
        let original = model(json!({"a": {"x": 1}}));
        let mut copy = original.get_value();
        copy.merge_value(json!({"a": {"x": 2}})).unwrap();
        copy.set("b", true).unwrap();

        assert_eq!(original.to_json(), json!({"a": {"x": 1}}));
        assert_eq!(copy.to_json(), json!({"a": {"x": 2}, "b": true}));
    }

    #[test]
    fn reset_value_empties_document() {
        let mut doc = model(json!({"a": 1, "b": {"c": 2}}));
        doc.reset_value();
        assert_eq!(doc.get_value().to_json(), json!({}));
        assert!(doc.is_empty());
    }

    #[test]
    fn extract_leaf() {
        let doc = model(json!({"a": {"b": 5}}));
        let found = doc.extract_value("a.b").unwrap().unwrap();
        assert_eq!(found.as_f64(), Some(5.0));
    }

    #[test]
    fn extract_no_match() {
        let doc = model(json!({"a": {}}));
        assert_eq!(doc.extract_value("a.b").unwrap(), None);
    }

    #[test]
    fn extract_array_as_container() {
        let doc = model(json!({"items": [{"id": "a"}, {"id": "b"}]}));
        let result = doc.extract_value("items[*].id").unwrap().unwrap();
        assert_eq!(
            result.as_sequence().unwrap(),
            &[Value::from("a"), Value::from("b")]
        );
    }

    #[test]
    fn extract_object_as_record() {
        let doc = model(json!({"a": {"b": {"c": true}}}));
        let result = doc.extract_value("a.b").unwrap().unwrap();
        assert_eq!(result.as_record().unwrap().get("c"), Some(&Value::Bool(true)));
    }

    #[test]
    fn nested_records_are_reenterable() {
        let mut doc = model(json!({"profile": {"name": "ann"}}));
        doc.get_mut("profile")
            .and_then(Value::as_record_mut)
            .unwrap()
            .set("age", 3)
            .unwrap();
        assert_eq!(doc.to_json(), json!({"profile": {"name": "ann", "age": 3}}));
    }

    #[test]
    fn serde_applies_root_checks() {
        let parsed: ValueModel = serde_json::from_str(r#"{"a":{"b":1}}"#).unwrap();
        assert_eq!(parsed.to_json(), json!({"a": {"b": 1}}));
        assert!(serde_json::from_str::<ValueModel>(r#"{"7":1}"#).is_err());
        assert!(serde_json::from_str::<ValueModel>("[1]").is_err());
    }

    #[test]
    fn to_json_string_is_compact() {
        let doc = model(json!({"b": 2, "a": 1}));
        assert_eq!(doc.to_json_string().unwrap(), r#"{"a":1,"b":2}"#);
    }

    fn json_leaf() -> impl Strategy<Value = serde_json::Value> {
        prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::from),
            any::<i64>().prop_map(serde_json::Value::from),
            "[a-zA-Z0-9 ]{0,12}".prop_map(serde_json::Value::from),
        ]
    }

    fn json_tree() -> impl Strategy<Value = serde_json::Value> {
        json_leaf().prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
                prop::collection::btree_map("[a-z0-9_]{1,8}", inner, 0..4)
                    .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn set_then_get_reproduces_document(
            fields in prop::collection::btree_map("[a-z][a-z0-9_]{0,7}", json_tree(), 0..6)
        ) {
            let data = serde_json::Value::Object(fields.into_iter().collect());
            let mut doc = ValueModel::new();
            doc.set_value(data.clone()).unwrap();
            prop_assert_eq!(doc.get_value().to_json(), data);
        }

        #[test]
        fn merging_into_empty_equals_setting(
            fields in prop::collection::btree_map("[a-z][a-z0-9_]{0,7}", json_tree(), 0..6)
        ) {
            let data = serde_json::Value::Object(fields.into_iter().collect());
            let mut merged = ValueModel::new();
            merged.merge_value(data.clone()).unwrap();
            let mut set = ValueModel::new();
            set.set_value(data).unwrap();
            prop_assert_eq!(merged, set);
        }
    }
}
