use std::fmt;
use std::sync::Arc;

use kvgraph_protocol::Transport;
use kvgraph_refs::Required;

use crate::error::SdkResult;

/// The transport an entity performs its remote operations through.
///
/// Cloning shares the underlying transport.
#[derive(Clone)]
pub struct Connection {
    transport: Required<Arc<dyn Transport>>,
}

impl Connection {
    /// A connection with no transport; remote operations fail until one is
    /// set.
    pub fn new() -> Self {
        Self {
            transport: Required::new("transport"),
        }
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        let mut connection = Self::new();
        connection.set_transport(transport);
        connection
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) -> &mut Self {
        self.transport.set(transport);
        self
    }

    pub fn transport(&self) -> Option<&Arc<dyn Transport>> {
        self.transport.get()
    }

    /// The transport, or a precondition error if none was set.
    pub fn require_transport(&self) -> SdkResult<&Arc<dyn Transport>> {
        Ok(self.transport.require()?)
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_set()
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("connected", &self.is_connected())
            .finish()
    }
}
