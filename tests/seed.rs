use clap::Parser;
use phonebook::seed::{self, confirmation, seed_into, SeedArgs};
use phonebook::{ContactStore, StoreError, ValidationError};

#[tokio::test]
async fn seeding_adds_exactly_one_contact() {
    let store = ContactStore::in_memory();
    let contact = seed_into(&store, "Ada Lovelace".into(), "39-44-5323523".into())
        .await
        .expect("seed succeeds");

    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(
        confirmation(&contact),
        "added Ada Lovelace number 39-44-5323523 to phonebook"
    );
}

#[tokio::test]
async fn seeding_short_name_fails_and_stores_nothing() {
    let store = ContactStore::in_memory();
    let err = seed_into(&store, "Al".into(), "111".into())
        .await
        .expect_err("name too short");

    assert!(matches!(
        err.downcast_ref::<StoreError>(),
        Some(StoreError::Validation(ValidationError::NameTooShort { .. }))
    ));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn run_opens_its_own_store() {
    let args = SeedArgs {
        name: "Grace".into(),
        number: "555".into(),
        uri: "memory://seed".into(),
    };
    let contact = seed::run(args).await.expect("seed against memory store");
    assert_eq!(contact.name, "Grace");
}

#[test]
fn connection_string_is_required() {
    // nothing else in this test binary reads MONGODB_URI
    std::env::remove_var("MONGODB_URI");
    let err = SeedArgs::try_parse_from(["phonebook-seed", "Ada", "1"])
        .expect_err("no --uri and no MONGODB_URI");
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[tokio::test]
async fn run_rejects_unknown_scheme() {
    let args = SeedArgs {
        name: "Grace".into(),
        number: "555".into(),
        uri: "ftp://nowhere".into(),
    };
    assert!(seed::run(args).await.is_err());
}
