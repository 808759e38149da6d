//! Umbrella crate for the phonebook service.
//!
//! Re-exports the contact store API and hosts the one-off seeding command
//! ([`seed`]). The HTTP service itself lives in the `phonebook-server` crate.

pub mod seed;

pub use store::{
    BackendConfig, Contact, ContactBackend, ContactId, ContactStore, InMemoryBackend, NewContact,
    StoreError, ValidContact, ValidationError, MIN_NAME_LEN,
};
