use std::sync::Arc;

use kvgraph_protocol::{AuthenticatedTransport, ClientConfig, Transport};
use kvgraph_refs::Endpoint;
use tracing::debug;

use crate::key_value::KeyValue;
use crate::relation::Relation;

/// Entry point: owns the configured transport and hands out entities bound
/// to it.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Wrap `transport` so every request carries the configured credentials
    /// and user agent.
    pub fn new<T: Transport + 'static>(config: ClientConfig, transport: T) -> Self {
        debug!(
            api_url = %config.api_url,
            auth = config.auth().display_name(),
            "client created"
        );
        let transport: Arc<dyn Transport> = Arc::new(AuthenticatedTransport::new(transport, &config));
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// An item address with an empty body.
    pub fn item(&self, collection: impl Into<String>, key: impl Into<String>) -> KeyValue {
        KeyValue::at(collection, key)
    }

    /// A relation from `source` to `destination`, ready for `put`/`delete`.
    pub fn relation<S, D>(&self, source: &S, kind: impl Into<String>, destination: &D) -> Relation
    where
        S: Endpoint + ?Sized,
        D: Endpoint + ?Sized,
    {
        Relation::between(source, kind, destination).with_transport(self.transport())
    }

    /// An unbound relation sharing this client's transport.
    pub fn empty_relation(&self) -> Relation {
        Relation::new().with_transport(self.transport())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("api_url", &self.config.api_url)
            .field("auth", &self.config.auth().display_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvgraph_protocol::{Method, MemoryTransport, Response};

    fn client(api_key: Option<&str>) -> (Client, Arc<MemoryTransport>) {
        let spy = Arc::new(MemoryTransport::new());
        let config = ClientConfig {
            api_key: api_key.map(str::to_string),
            ..Default::default()
        };
        (Client::new(config, spy.clone()), spy)
    }

    #[test]
    fn relation_requests_are_authenticated() {
        let (client, spy) = client(Some("my-key"));
        spy.push_response(Response::new(201));

        let ann = client.item("users", "ann");
        let bob = client.item("users", "bob");
        let mut follows = client.relation(&ann, "follows", &bob);
        assert!(follows.put().unwrap().success);

        let sent = spy.last_request().unwrap();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.path, "users/ann/relation/follows/users/bob");
        assert_eq!(sent.header("Authorization"), Some("Basic bXkta2V5Og=="));
        assert!(sent.header("User-Agent").unwrap().starts_with("kvgraph/"));
    }

    #[test]
    fn anonymous_client_sends_no_credentials() {
        let (client, spy) = client(None);
        let mut relation = client.empty_relation();
        relation.init(&serde_json::json!({
            "relation": "likes",
            "source": {"collection": "users", "key": "1"},
            "destination": {"collection": "movies", "key": "alien"},
        }))
        .unwrap();

        relation.delete("movies", "alien").unwrap();
        let sent = spy.last_request().unwrap();
        assert!(sent.header("Authorization").is_none());
        assert_eq!(sent.target(), "users/1/relation/likes/movies/alien?purge=true");
    }

    #[test]
    fn item_is_addressed() {
        let (client, _spy) = client(None);
        let item = client.item("users", "1");
        assert_eq!(item.collection(), Some("users"));
        assert_eq!(item.key(), Some("1"));
        assert!(format!("{client:?}").contains("anonymous"));
    }
}
