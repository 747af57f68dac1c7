//! The tagged value union stored in every property bag.
//!
//! Conversion from `serde_json::Value` normalizes every JSON object, at any
//! depth, into a [`Value::Record`] so that nested structures are always
//! re-enterable containers.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::model::ValueModel;

/// A single field value inside a [`ValueModel`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// An ordered list; replaced wholesale on merge.
    Sequence(Vec<Value>),
    /// A nested record; merged field by field.
    Record(ValueModel),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for sequences and records.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Record(_))
    }

    pub fn as_record(&self) -> Option<&ValueModel> {
        match self {
            Value::Record(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut ValueModel> {
        match self {
            Value::Record(model) => Some(model),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Human-readable name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Record(_) => "record",
        }
    }

    /// Convert back into plain JSON.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Record(model) => model.to_json(),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            // Nested records may carry any string key; only roots are checked.
            serde_json::Value::Object(map) => Value::Record(ValueModel::from_map_unchecked(map)),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        value.to_json()
    }
}

impl From<ValueModel> for Value {
    fn from(model: ValueModel) -> Self {
        Value::Record(model)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON representation and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}
