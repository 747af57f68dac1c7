//! [`KeyValue`]: an item-like endpoint, its address plus its document body.

use kvgraph_protocol::EndpointWire;
use kvgraph_refs::{Endpoint, RefAddress};
use kvgraph_types::ValueModel;
use serde_json::{Map, Value as Json};

use crate::error::{SdkError, SdkResult};

/// One stored item: where it lives and what it holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyValue {
    address: RefAddress,
    value: ValueModel,
}

impl KeyValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// An item at `collection`/`key` with an empty body.
    pub fn at(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            address: RefAddress::at(collection, key),
            value: ValueModel::new(),
        }
    }

    /// Copy the address of any endpoint. The body starts empty.
    pub fn from_endpoint<E: Endpoint + ?Sized>(endpoint: &E) -> Self {
        let mut item = Self::new();
        if let Some(collection) = endpoint.collection() {
            item.address.set_collection(collection);
        }
        if let Some(key) = endpoint.key() {
            item.address.set_key(key);
        }
        item
    }

    pub fn address(&self) -> &RefAddress {
        &self.address
    }

    pub fn address_mut(&mut self) -> &mut RefAddress {
        &mut self.address
    }

    pub fn value(&self) -> &ValueModel {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut ValueModel {
        &mut self.value
    }

    /// Populate from a decoded payload.
    ///
    /// `collection`, `key` and `ref` are read from the top level or from a
    /// nested `path` block; `value` is written into the body. Null or empty
    /// input leaves the item unchanged.
    pub fn init(&mut self, data: &Json) -> SdkResult<&mut Self> {
        let Some(fields) = record_fields(data, "item")? else {
            return Ok(self);
        };
        let path = match fields.get("path") {
            Some(Json::Object(path)) => path,
            Some(Json::Null) | None => fields,
            Some(other) => {
                return Err(SdkError::InvalidStructure(format!(
                    "item path must be a record, found {}",
                    json_type(other)
                )))
            }
        };

        let collection = string_field(path, "collection")?;
        let key = string_field(path, "key")?;
        let reference = string_field(path, "ref")?;
        let value = match fields.get("value") {
            Some(value) => Some(ValueModel::from_json(value)?),
            None => None,
        };

        if let Some(collection) = collection {
            self.address.set_collection(collection);
        }
        if let Some(key) = key {
            self.address.set_key(key);
        }
        if let Some(reference) = reference {
            self.address.set_ref(reference);
        }
        if let Some(value) = value {
            self.value.set_value(value)?;
        }
        Ok(self)
    }

    /// The `{collection, kind: "item", key}` block, or `None` unless both
    /// parts are set.
    pub fn to_wire_endpoint(&self) -> Option<EndpointWire> {
        Some(EndpointWire::item(
            self.address.collection()?,
            self.address.key()?,
        ))
    }

    /// Clear the body only. The address and ref survive.
    pub fn reset_value(&mut self) -> &mut Self {
        self.value.reset_value();
        self
    }

    /// Clear the address and the body.
    pub fn reset(&mut self) {
        self.address.reset();
        self.value.reset_value();
    }
}

impl Endpoint for KeyValue {
    fn collection(&self) -> Option<&str> {
        self.address.collection()
    }

    fn key(&self) -> Option<&str> {
        self.address.key()
    }
}

/// The fields of a record payload, `None` for null or empty input.
pub(crate) fn record_fields<'a>(
    data: &'a Json,
    what: &str,
) -> SdkResult<Option<&'a Map<String, Json>>> {
    match data {
        Json::Null => Ok(None),
        Json::Object(fields) if fields.is_empty() => Ok(None),
        Json::Object(fields) => Ok(Some(fields)),
        other => Err(SdkError::InvalidStructure(format!(
            "{what} payload must be a record, found {}",
            json_type(other)
        ))),
    }
}

/// A string field. Numbers are accepted and rendered in decimal; null counts
/// as absent.
pub(crate) fn string_field(fields: &Map<String, Json>, name: &str) -> SdkResult<Option<String>> {
    match fields.get(name) {
        None | Some(Json::Null) => Ok(None),
        Some(Json::String(value)) => Ok(Some(value.clone())),
        Some(Json::Number(value)) => Ok(Some(value.to_string())),
        Some(other) => Err(SdkError::InvalidStructure(format!(
            "{name} must be a string, found {}",
            json_type(other)
        ))),
    }
}

pub(crate) fn json_type(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "record",
    }
}
