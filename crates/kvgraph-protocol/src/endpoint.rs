/// Request path building for the API.
///
/// Paths are relative to the API root configured in
/// [`ClientConfig`](crate::ClientConfig) and are built from already
/// validated segments.
pub mod endpoints {
    /// Path segment separating an item from its outgoing relations.
    pub const RELATION_SEGMENT: &str = "relation";
    /// Query parameter forcing a permanent delete.
    pub const PURGE_PARAM: &str = "purge";

    /// `{collection}/{key}`
    pub fn item_path(collection: &str, key: &str) -> String {
        format!("{collection}/{key}")
    }

    /// `{c1}/{k1}/relation/{kind}/{c2}/{k2}`
    pub fn relation_path(
        source_collection: &str,
        source_key: &str,
        kind: &str,
        destination_collection: &str,
        destination_key: &str,
    ) -> String {
        format!(
            "{}/{RELATION_SEGMENT}/{kind}/{}",
            item_path(source_collection, source_key),
            item_path(destination_collection, destination_key),
        )
    }
}
