use crate::config::ServerConfig;
use crate::error::ServerResult;
use std::sync::Arc;
use store::ContactStore;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Contact store (shared across requests)
    pub store: Arc<ContactStore>,
}

impl ServerState {
    /// Create server state, connecting to the configured store.
    pub async fn connect(config: ServerConfig) -> ServerResult<Self> {
        let backend = config.backend_config()?;
        let store = ContactStore::connect(&backend).await?;
        Ok(Self::with_store(config, store))
    }

    /// Create server state over an already opened store.
    pub fn with_store(config: ServerConfig, store: ContactStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }
}
