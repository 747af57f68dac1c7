use serde::{Deserialize, Serialize};

/// `kind` tag of a serialized relation.
pub const RELATIONSHIP_KIND: &str = "relationship";
/// `kind` tag of a serialized item endpoint.
pub const ITEM_KIND: &str = "item";

/// One end of a relation on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointWire {
    pub collection: String,
    pub kind: String,
    pub key: String,
}

impl EndpointWire {
    pub fn item(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            kind: ITEM_KIND.into(),
            key: key.into(),
        }
    }
}

/// A relation on the wire. Absent endpoints and timestamps are omitted
/// rather than emitted half-populated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipWire {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EndpointWire>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<EndpointWire>,
}

impl Default for RelationshipWire {
    fn default() -> Self {
        Self {
            kind: RELATIONSHIP_KIND.into(),
            relation: None,
            timestamp: None,
            source: None,
            destination: None,
        }
    }
}
