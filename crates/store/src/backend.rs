use crate::{Contact, ContactId, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Trait for a storage backend holding contact records.
/// This allows for different storage implementations (e.g., in-memory, MongoDB).
#[async_trait]
pub trait ContactBackend: Send + Sync {
    /// Persist a new record. The id is assigned by the caller.
    async fn insert(&self, contact: &Contact) -> Result<(), StoreError>;
    /// Retrieve a record by id.
    async fn get(&self, id: &ContactId) -> Result<Option<Contact>, StoreError>;
    /// Remove a record by id, returning it if it existed.
    async fn remove(&self, id: &ContactId) -> Result<Option<Contact>, StoreError>;
    /// Return every record, in no particular order.
    async fn scan(&self) -> Result<Vec<Contact>, StoreError>;
    /// Total number of records.
    async fn count(&self) -> Result<u64, StoreError>;
}

/// Scheme prefix selecting the in-memory backend.
pub const MEMORY_SCHEME: &str = "memory://";

/// Configuration for selecting and building a backend.
///
/// # Example
/// ```
/// use store::BackendConfig;
///
/// // In-memory (for testing)
/// let config = BackendConfig::in_memory();
///
/// // Picked from a connection string
/// let config = BackendConfig::from_uri("mongodb://localhost:27017/phonebook").unwrap();
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BackendConfig {
    /// MongoDB at the given connection string.
    ///
    /// Requires the `backend-mongo` feature (enabled by default).
    Mongo { uri: String },
    /// An in-memory `HashMap`. Nothing survives a restart.
    #[default]
    InMemory,
}

impl BackendConfig {
    pub fn in_memory() -> Self {
        BackendConfig::InMemory
    }

    pub fn mongo<S: Into<String>>(uri: S) -> Self {
        BackendConfig::Mongo { uri: uri.into() }
    }

    /// Pick a backend from a connection string.
    ///
    /// `memory://...` selects the in-memory backend, `mongodb://` and
    /// `mongodb+srv://` select MongoDB. Anything else is rejected.
    pub fn from_uri(uri: &str) -> Result<Self, StoreError> {
        let uri = uri.trim();
        if uri.starts_with(MEMORY_SCHEME) {
            Ok(Self::in_memory())
        } else if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
            Ok(Self::mongo(uri))
        } else {
            Err(StoreError::backend(format!(
                "unsupported connection string scheme: {}",
                uri.split("://").next().unwrap_or(uri)
            )))
        }
    }

    /// Build the backend, opening a connection when one is needed.
    pub async fn build(&self) -> Result<Box<dyn ContactBackend>, StoreError> {
        match self {
            BackendConfig::InMemory => Ok(Box::new(InMemoryBackend::new())),
            BackendConfig::Mongo { uri } => {
                #[cfg(feature = "backend-mongo")]
                {
                    Ok(Box::new(MongoBackend::connect(uri).await?))
                }
                #[cfg(not(feature = "backend-mongo"))]
                {
                    let _ = uri;
                    Err(StoreError::backend("mongo backend disabled at compile time"))
                }
            }
        }
    }
}

/// An in-memory backend using a `RwLock` around a `HashMap`.
pub struct InMemoryBackend {
    records: RwLock<HashMap<ContactId, Contact>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactBackend for InMemoryBackend {
    async fn insert(&self, contact: &Contact) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        if guard.contains_key(&contact.id) {
            return Err(StoreError::backend(format!(
                "duplicate key: {} already exists",
                contact.id
            )));
        }
        guard.insert(contact.id, contact.clone());
        Ok(())
    }

    async fn get(&self, id: &ContactId) -> Result<Option<Contact>, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.get(id).cloned())
    }

    async fn remove(&self, id: &ContactId) -> Result<Option<Contact>, StoreError> {
        let removed = self
            .records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?
            .remove(id);
        Ok(removed)
    }

    async fn scan(&self) -> Result<Vec<Contact>, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.len() as u64)
    }
}

/// The MongoDB backend implementation.
#[cfg(feature = "backend-mongo")]
pub mod mongo;

#[cfg(feature = "backend-mongo")]
pub use mongo::MongoBackend;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_uri_selects_backend_by_scheme() {
        assert_eq!(
            BackendConfig::from_uri("memory://phonebook").unwrap(),
            BackendConfig::InMemory
        );
        assert_eq!(
            BackendConfig::from_uri("mongodb+srv://user:pw@cluster0/phonebook").unwrap(),
            BackendConfig::mongo("mongodb+srv://user:pw@cluster0/phonebook")
        );
        assert!(matches!(
            BackendConfig::from_uri("postgres://localhost/db"),
            Err(StoreError::Backend(msg)) if msg.contains("postgres")
        ));
    }

    #[tokio::test]
    async fn in_memory_backend_rejects_duplicate_ids() {
        let backend = InMemoryBackend::new();
        let contact = Contact {
            id: ContactId::generate(),
            name: "Ada".into(),
            number: "1".into(),
        };
        backend.insert(&contact).await.expect("first insert");
        assert!(backend.insert(&contact).await.is_err());
        assert_eq!(backend.count().await.unwrap(), 1);
    }
}
