//! # Phonebook contact store
//!
//! Persistence for phonebook contact records behind a pluggable backend.
//!
//! ## Core Features
//!
//! - **Pluggable Backends**: storage goes through the async [`ContactBackend`]
//!   trait. Out of the box there is:
//!   - an in-memory `HashMap` backend for tests and local runs,
//!   - a MongoDB backend (`backend-mongo` feature, on by default).
//! - **Schema at the boundary**: create input is a [`NewContact`] that must pass
//!   [`NewContact::validate`] before anything reaches a backend.
//! - **Typed outcomes**: absence is `Ok(None)` / `Ok(false)`, every failure is a
//!   [`StoreError`].
//!
//! ## Example Usage
//!
//! ```
//! use store::{ContactStore, NewContact};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let store = ContactStore::in_memory();
//! let ada = store.create(NewContact::new("Ada", "12345")).await.unwrap();
//!
//! let fetched = store.find_by_id(&ada.id.to_string()).await.unwrap();
//! assert_eq!(fetched, Some(ada));
//! assert_eq!(store.count().await.unwrap(), 1);
//! # });
//! ```

mod backend;
mod contact;

#[cfg(feature = "backend-mongo")]
pub use backend::MongoBackend;
pub use backend::{BackendConfig, ContactBackend, InMemoryBackend, MEMORY_SCHEME};
pub use contact::{
    Contact, ContactId, NewContact, ValidContact, ValidationError, MIN_NAME_LEN,
};

use thiserror::Error;

/// Store error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Cast to ObjectId failed for value \"{0}\" at path \"_id\"")]
    InvalidId(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Contact store shared by every request handler.
pub struct ContactStore {
    /// The backend used for storage, abstracted behind a trait.
    backend: Box<dyn ContactBackend>,
}

impl ContactStore {
    /// Open the store, connecting to the configured backend.
    pub async fn connect(cfg: &BackendConfig) -> Result<Self, StoreError> {
        let backend = cfg.build().await?;
        Ok(Self::with_backend(backend))
    }

    /// Build a store over a custom backend (e.g., a test double).
    pub fn with_backend(backend: Box<dyn ContactBackend>) -> Self {
        Self { backend }
    }

    /// A store over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::with_backend(Box::new(InMemoryBackend::new()))
    }

    /// Every record, order unspecified.
    pub async fn list_all(&self) -> Result<Vec<Contact>, StoreError> {
        self.backend.scan().await
    }

    /// Look a record up by its string id.
    ///
    /// Malformed ids fail with [`StoreError::InvalidId`]; well-formed ids that
    /// were never issued give `Ok(None)`.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Contact>, StoreError> {
        log::debug!("querying for id {id}");
        let id = ContactId::parse(id)?;
        let found = self.backend.get(&id).await?;
        if found.is_none() {
            log::debug!("no contact found for id {id}");
        }
        Ok(found)
    }

    /// Validate the input, assign a fresh id and persist.
    pub async fn create(&self, input: NewContact) -> Result<Contact, StoreError> {
        let valid = input.validate()?;
        let contact = valid.into_contact(ContactId::generate());
        self.backend.insert(&contact).await?;
        log::debug!("created contact {}", contact.id);
        Ok(contact)
    }

    /// Remove a record. Returns `false` when nothing had that id.
    pub async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let id = ContactId::parse(id)?;
        let removed = self.backend.remove(&id).await?;
        Ok(removed.is_some())
    }

    /// Total record count.
    pub async fn count(&self) -> Result<u64, StoreError> {
        self.backend.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_find_and_list() {
        let store = ContactStore::in_memory();
        let created = store
            .create(NewContact::new("Ada Lovelace", "040-123456"))
            .await
            .expect("create succeeds");

        let fetched = store
            .find_by_id(&created.id.to_string())
            .await
            .expect("find ok")
            .expect("record exists");
        assert_eq!(fetched.name, "Ada Lovelace");
        assert_eq!(fetched.number, "040-123456");

        let all = store.list_all().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn short_name_leaves_count_unchanged() {
        let store = ContactStore::in_memory();
        store.create(NewContact::new("Grace", "1")).await.unwrap();

        let err = store.create(NewContact::new("Al", "111")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::NameTooShort { actual: 2, .. })
        ));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn malformed_id_is_distinct_from_absent() {
        let store = ContactStore::in_memory();
        assert_eq!(
            store.find_by_id("000000000000000000000000").await,
            Ok(None)
        );
        assert!(matches!(
            store.find_by_id("not-a-valid-id").await,
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            store.delete_by_id("xyz").await,
            Err(StoreError::InvalidId(_))
        ));
    }
}
