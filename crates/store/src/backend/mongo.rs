//! MongoDB-backed contact storage.
//!
//! Records live in the `people` collection of the database named in the
//! connection string (or [`DEFAULT_DATABASE`] when the string names none).

use crate::backend::ContactBackend;
use crate::{Contact, ContactId, StoreError};
use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "phonebook";

/// Collection holding contact documents.
pub const COLLECTION: &str = "people";

/// On-disk shape of a contact.
#[derive(Serialize, Deserialize, Debug, Clone)]
struct PersonDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    number: String,
}

impl From<&Contact> for PersonDocument {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.as_object_id(),
            name: contact.name.clone(),
            number: contact.number.clone(),
        }
    }
}

impl From<PersonDocument> for Contact {
    fn from(doc: PersonDocument) -> Self {
        Contact {
            id: ContactId::from(doc.id),
            name: doc.name,
            number: doc.number,
        }
    }
}

/// Contact backend over a pooled MongoDB client.
///
/// The driver's client is internally reference counted and safe to share
/// across concurrent requests.
pub struct MongoBackend {
    collection: Collection<PersonDocument>,
}

impl MongoBackend {
    /// Connect using a `mongodb://` or `mongodb+srv://` connection string.
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await.map_err(StoreError::backend)?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        log::info!(
            "using mongo database {} collection {}",
            database.name(),
            COLLECTION
        );
        Ok(Self {
            collection: database.collection(COLLECTION),
        })
    }
}

#[async_trait]
impl ContactBackend for MongoBackend {
    async fn insert(&self, contact: &Contact) -> Result<(), StoreError> {
        self.collection
            .insert_one(PersonDocument::from(contact), None)
            .await
            .map_err(StoreError::backend)?;
        Ok(())
    }

    async fn get(&self, id: &ContactId) -> Result<Option<Contact>, StoreError> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.as_object_id() }, None)
            .await
            .map_err(StoreError::backend)?;
        Ok(found.map(Contact::from))
    }

    async fn remove(&self, id: &ContactId) -> Result<Option<Contact>, StoreError> {
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": id.as_object_id() }, None)
            .await
            .map_err(StoreError::backend)?;
        Ok(removed.map(Contact::from))
    }

    async fn scan(&self) -> Result<Vec<Contact>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {}, None)
            .await
            .map_err(StoreError::backend)?;
        let docs: Vec<PersonDocument> = cursor.try_collect().await.map_err(StoreError::backend)?;
        Ok(docs.into_iter().map(Contact::from).collect())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.collection
            .count_documents(doc! {}, None)
            .await
            .map_err(StoreError::backend)
    }
}
