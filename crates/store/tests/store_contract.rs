use std::sync::Arc;

use store::{ContactStore, NewContact, StoreError, ValidationError};

async fn seeded(names: &[&str]) -> ContactStore {
    let store = ContactStore::in_memory();
    for (i, name) in names.iter().enumerate() {
        store
            .create(NewContact::new(*name, format!("555-{i:04}")))
            .await
            .expect("seed create");
    }
    store
}

#[tokio::test]
async fn delete_twice_reports_not_found_second_time() {
    let store = seeded(&["Arto Hellas"]).await;
    let id = store.list_all().await.unwrap()[0].id.to_string();

    assert_eq!(store.delete_by_id(&id).await, Ok(true));
    assert_eq!(store.delete_by_id(&id).await, Ok(false));
    assert_eq!(store.find_by_id(&id).await, Ok(None));
}

#[tokio::test]
async fn delete_of_never_issued_id_is_not_found() {
    let store = seeded(&["Dan Abramov"]).await;
    assert_eq!(store.delete_by_id("000000000000000000000000").await, Ok(false));
    assert_eq!(store.count().await, Ok(1));
}

#[tokio::test]
async fn count_tracks_list_through_creates_and_deletes() {
    let store = seeded(&["Ada", "Grace", "Linus", "Barbara"]).await;
    assert_eq!(store.count().await.unwrap(), store.list_all().await.unwrap().len() as u64);

    let victim = store.list_all().await.unwrap()[1].id.to_string();
    store.delete_by_id(&victim).await.unwrap();
    // too short, must not change the count
    let _ = store.create(NewContact::new("Jo", "1")).await;

    assert_eq!(store.count().await.unwrap(), 3);
    assert_eq!(store.list_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn duplicate_names_and_numbers_are_allowed() {
    let store = ContactStore::in_memory();
    let a = store.create(NewContact::new("Mary Poppendieck", "39-23-6423122")).await.unwrap();
    let b = store.create(NewContact::new("Mary Poppendieck", "39-23-6423122")).await.unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn missing_fields_fail_validation() {
    let store = ContactStore::in_memory();
    let err = store
        .create(NewContact {
            name: None,
            number: Some("12".into()),
        })
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::Validation(ValidationError::MissingName));

    let err = store
        .create(NewContact {
            name: Some("Ada".into()),
            number: Some(String::new()),
        })
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::Validation(ValidationError::MissingNumber));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_ids() {
    let store = Arc::new(ContactStore::in_memory());
    let mut handles = Vec::new();
    for i in 0..32 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .create(NewContact::new(format!("person-{i}"), format!("{i}")))
                .await
        }));
    }
    for handle in handles {
        handle.await.expect("task joins").expect("create succeeds");
    }

    let mut ids: Vec<_> = store.list_all().await.unwrap().into_iter().map(|c| c.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 32);
}
