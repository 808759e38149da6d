//! One-off seeding: open a store connection, create a single contact, exit.
//!
//! Runs as its own process and shares nothing with a running server.

use anyhow::Context;
use clap::Parser;
use store::{BackendConfig, Contact, ContactStore, NewContact};

/// Add one contact to the phonebook store.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "phonebook-seed", version)]
pub struct SeedArgs {
    /// Contact name (at least 3 characters)
    pub name: String,

    /// Contact phone number
    pub number: String,

    /// Store connection string
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    pub uri: String,
}

/// Connect, create the contact and hand back the stored record.
pub async fn run(args: SeedArgs) -> anyhow::Result<Contact> {
    let backend = BackendConfig::from_uri(&args.uri).context("invalid connection string")?;
    let store = ContactStore::connect(&backend)
        .await
        .context("failed to connect to the contact store")?;

    seed_into(&store, args.name, args.number).await
}

/// Create one contact in an already opened store.
pub async fn seed_into(store: &ContactStore, name: String, number: String) -> anyhow::Result<Contact> {
    let contact = store
        .create(NewContact::new(name, number))
        .await
        .context("failed to add contact")?;
    tracing::debug!(id = %contact.id, "seeded contact");
    Ok(contact)
}

/// Confirmation line printed after a successful seed.
pub fn confirmation(contact: &Contact) -> String {
    format!(
        "added {} number {} to phonebook",
        contact.name, contact.number
    )
}
