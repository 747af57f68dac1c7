//! [`Relation`]: a typed, directed edge between two items.
//!
//! An edge is addressed by both of its endpoints and its kind:
//! `{c1}/{k1}/relation/{kind}/{c2}/{k2}`. Creating it is a `PUT` with no
//! body; deleting it is a `DELETE` with `purge=true`, which removes it
//! permanently. Every path component is checked before any request is sent.
//!
//! ```text
//! Unbound --set source/kind/destination--> Bound --put--> Materialized
//!                                            \                |
//!                                             +----delete-----+--> Deleted
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kvgraph_protocol::{endpoints, Method, RelationshipWire, Request, Transport};
use kvgraph_refs::{validate_path_segment, Endpoint, RefError, Required};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tracing::debug;

use crate::entity::VersionedEntity;
use crate::error::{SdkError, SdkResult};
use crate::key_value::{json_type, record_fields, KeyValue};
use crate::response::Outcome;

/// Where a relation stands with respect to the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationState {
    /// Kind or an endpoint is missing.
    Unbound,
    /// Fully addressed, not yet confirmed by the server.
    Bound,
    /// The last `put` succeeded.
    Materialized,
    /// The last `delete` succeeded. Local fields stay readable.
    Deleted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Lifecycle {
    #[default]
    Local,
    Materialized,
    Deleted,
}

/// A directed edge of exactly one kind between exactly one ordered pair of
/// items.
#[derive(Clone, Debug)]
pub struct Relation {
    kind: Required<String>,
    source: Option<KeyValue>,
    destination: Option<KeyValue>,
    /// Server-assigned, milliseconds since the Unix epoch.
    timestamp: Option<i64>,
    entity: VersionedEntity,
    lifecycle: Lifecycle,
}

impl Default for Relation {
    fn default() -> Self {
        Self {
            kind: Required::new("kind"),
            source: None,
            destination: None,
            timestamp: None,
            entity: VersionedEntity::new(),
            lifecycle: Lifecycle::Local,
        }
    }
}

impl Relation {
    /// An unbound relation.
    pub fn new() -> Self {
        Self::default()
    }

    /// A relation of `kind` from `source` to `destination`.
    pub fn between<S, D>(source: &S, kind: impl Into<String>, destination: &D) -> Self
    where
        S: Endpoint + ?Sized,
        D: Endpoint + ?Sized,
    {
        let mut relation = Self::new();
        relation
            .set_source(source)
            .set_kind(kind)
            .set_destination(destination);
        relation
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.entity.set_transport(transport);
        self
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) -> &mut Self {
        self.entity.set_transport(transport);
        self
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn require_kind(&self) -> SdkResult<&str> {
        Ok(self.kind.require_str()?)
    }

    pub fn set_kind(&mut self, kind: impl Into<String>) -> &mut Self {
        self.kind.set_str(kind);
        self.lifecycle = Lifecycle::Local;
        self
    }

    pub fn source(&self) -> Option<&KeyValue> {
        self.source.as_ref()
    }

    /// Point the edge away from `endpoint`. Only its address is copied.
    pub fn set_source<E: Endpoint + ?Sized>(&mut self, endpoint: &E) -> &mut Self {
        self.source = Some(KeyValue::from_endpoint(endpoint));
        self.lifecycle = Lifecycle::Local;
        self
    }

    pub fn destination(&self) -> Option<&KeyValue> {
        self.destination.as_ref()
    }

    /// Point the edge at `endpoint`. Only its address is copied.
    pub fn set_destination<E: Endpoint + ?Sized>(&mut self, endpoint: &E) -> &mut Self {
        self.destination = Some(KeyValue::from_endpoint(endpoint));
        self.lifecycle = Lifecycle::Local;
        self
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn entity(&self) -> &VersionedEntity {
        &self.entity
    }

    pub fn ref_(&self) -> Option<&str> {
        self.entity.ref_()
    }

    pub fn status_code(&self) -> Option<u16> {
        self.entity.status_code()
    }

    /// Whether the last remote call got a 2xx response.
    pub fn success(&self) -> bool {
        self.entity.success()
    }

    pub fn state(&self) -> RelationState {
        match self.lifecycle {
            Lifecycle::Materialized => RelationState::Materialized,
            Lifecycle::Deleted => RelationState::Deleted,
            Lifecycle::Local if self.path().is_ok() => RelationState::Bound,
            Lifecycle::Local => RelationState::Unbound,
        }
    }

    /// The request path, after checking every component.
    pub fn path(&self) -> SdkResult<String> {
        self.path_to(self.destination.as_ref())
    }

    fn path_to(&self, destination: Option<&KeyValue>) -> SdkResult<String> {
        let (source_collection, source_key) =
            endpoint_segments(self.source.as_ref(), "source collection", "source key")?;
        let kind = self.require_kind()?;
        validate_path_segment("kind", kind)?;
        let (destination_collection, destination_key) =
            endpoint_segments(destination, "destination collection", "destination key")?;
        Ok(endpoints::relation_path(
            source_collection,
            source_key,
            kind,
            destination_collection,
            destination_key,
        ))
    }

    /// Create the edge.
    ///
    /// A non-2xx response comes back as `success == false`. The ref is only
    /// updated if the server sends an `ETag`.
    pub fn put(&mut self) -> SdkResult<Outcome> {
        let path = self.path()?;
        let (outcome, _) = self.entity.send(Request::new(Method::Put, path))?;
        if outcome.success {
            self.lifecycle = Lifecycle::Materialized;
        }
        Ok(outcome)
    }

    /// Permanently delete the edge to `to_collection`/`to_key`.
    ///
    /// The destination is rebound to the given item once the path checks
    /// out, so the local fields describe the edge that was deleted. A
    /// rejected call leaves the relation untouched.
    pub fn delete(&mut self, to_collection: &str, to_key: &str) -> SdkResult<Outcome> {
        let target = KeyValue::at(to_collection, to_key);
        let path = self.path_to(Some(&target))?;

        let rebinding = self.destination.as_ref().map_or(true, |current| {
            current.collection() != target.collection() || current.key() != target.key()
        });
        if rebinding {
            self.destination = Some(target);
            self.lifecycle = Lifecycle::Local;
        }

        let request =
            Request::new(Method::Delete, path).with_query(endpoints::PURGE_PARAM, "true");
        let (outcome, _) = self.entity.send(request)?;
        if outcome.success {
            self.lifecycle = Lifecycle::Deleted;
        }
        Ok(outcome)
    }

    /// The wire form. Endpoints missing a collection or key are omitted.
    pub fn to_wire(&self) -> RelationshipWire {
        RelationshipWire {
            relation: self.kind.get().cloned(),
            timestamp: self.timestamp,
            source: self.source.as_ref().and_then(KeyValue::to_wire_endpoint),
            destination: self
                .destination
                .as_ref()
                .and_then(KeyValue::to_wire_endpoint),
            ..RelationshipWire::default()
        }
    }

    pub fn to_json(&self) -> SdkResult<Json> {
        serde_json::to_value(self.to_wire()).map_err(|e| SdkError::InvalidStructure(e.to_string()))
    }

    /// Populate from a decoded wire payload.
    ///
    /// Reads `source`, `destination`, `relation` and `timestamp`; other
    /// fields are ignored. Null or empty input leaves the relation
    /// unchanged. Nothing is applied if any field is malformed.
    pub fn init(&mut self, data: &Json) -> SdkResult<&mut Self> {
        let Some(fields) = record_fields(data, "relation")? else {
            return Ok(self);
        };

        let kind = match fields.get("relation") {
            None | Some(Json::Null) => None,
            Some(Json::String(kind)) => Some(kind.clone()),
            Some(other) => {
                return Err(SdkError::InvalidStructure(format!(
                    "relation kind must be a single string, found {}",
                    json_type(other)
                )))
            }
        };
        let timestamp = match fields.get("timestamp") {
            None | Some(Json::Null) => None,
            Some(Json::Number(ts)) => Some(ts.as_i64().ok_or_else(|| {
                SdkError::InvalidStructure(format!("timestamp {ts} is not an integer"))
            })?),
            Some(other) => {
                return Err(SdkError::InvalidStructure(format!(
                    "timestamp must be an integer, found {}",
                    json_type(other)
                )))
            }
        };
        let source = endpoint_from(fields.get("source"))?;
        let destination = endpoint_from(fields.get("destination"))?;

        if let Some(kind) = kind {
            self.kind.set_str(kind);
        }
        if timestamp.is_some() {
            self.timestamp = timestamp;
        }
        if source.is_some() {
            self.source = source;
        }
        if destination.is_some() {
            self.destination = destination;
        }
        self.lifecycle = Lifecycle::Local;

        debug!(kind = ?self.kind(), timestamp = ?self.timestamp, "relation loaded");
        Ok(self)
    }

    /// Back to Unbound: kind, endpoints, timestamp, ref and status are
    /// cleared. The transport is kept.
    pub fn reset(&mut self) {
        self.kind.clear();
        self.source = None;
        self.destination = None;
        self.timestamp = None;
        self.entity.reset();
        self.lifecycle = Lifecycle::Local;
    }
}

fn endpoint_segments<'a>(
    endpoint: Option<&'a KeyValue>,
    collection_field: &'static str,
    key_field: &'static str,
) -> SdkResult<(&'a str, &'a str)> {
    let collection = endpoint
        .and_then(|e| e.collection())
        .ok_or(RefError::Missing {
            field: collection_field,
        })?;
    let key = endpoint
        .and_then(|e| e.key())
        .ok_or(RefError::Missing { field: key_field })?;
    validate_path_segment(collection_field, collection)?;
    validate_path_segment(key_field, key)?;
    Ok((collection, key))
}

fn endpoint_from(data: Option<&Json>) -> SdkResult<Option<KeyValue>> {
    match data {
        None => Ok(None),
        Some(data) => match record_fields(data, "endpoint")? {
            None => Ok(None),
            Some(_) => {
                let mut item = KeyValue::new();
                item.init(data)?;
                Ok(Some(item))
            }
        },
    }
}
