mod common;

use blobdoc::{paths::data_path, prelude::*};
use common::{BUCKET, FlakyBackend, OtherThingy, Thingy, bob, registry, store, store_with};
use std::collections::HashMap;

#[tokio::test]
async fn never_written_uid_reads_empty() {
    let store = store().await;

    let all = store.collections().get_all("nobody").await.unwrap();

    assert!(all.is_empty());
    assert_eq!(store.collections().get::<String>("nobody", "k").await.unwrap(), None);
}

#[tokio::test]
async fn put_then_get_scalars() {
    let store = store().await;
    let collections = store.collections();

    collections.put("sausheong", "123", &"hello world!".to_string()).await.unwrap();
    collections.put("sausheong", "count", &7i64).await.unwrap();
    collections.put("sausheong", "flag", &true).await.unwrap();
    collections.put("sausheong", "image", &vec![0x89u8, b'P', b'N', b'G']).await.unwrap();

    assert_eq!(
        collections.get::<String>("sausheong", "123").await.unwrap(),
        Some("hello world!".to_string())
    );
    assert_eq!(collections.get::<i64>("sausheong", "count").await.unwrap(), Some(7));
    assert_eq!(collections.get::<bool>("sausheong", "flag").await.unwrap(), Some(true));
    assert_eq!(
        collections.get::<Vec<u8>>("sausheong", "image").await.unwrap(),
        Some(vec![0x89, b'P', b'N', b'G'])
    );
}

#[tokio::test]
async fn put_then_get_composites() {
    let store = store().await;
    let collections = store.collections();

    let mut teams = HashMap::new();
    teams.insert("red".to_string(), bob().bunch);
    teams.insert("blue".to_string(), vec![]);

    collections.put("sausheong", "Bob", &bob()).await.unwrap();
    collections.put("sausheong", "teams", &teams).await.unwrap();

    assert_eq!(collections.get::<Thingy>("sausheong", "Bob").await.unwrap(), Some(bob()));
    assert_eq!(
        collections
            .get::<HashMap<String, Vec<OtherThingy>>>("sausheong", "teams")
            .await
            .unwrap(),
        Some(teams)
    );

    let all = collections.get_all("sausheong").await.unwrap();
    assert_eq!(all.keys().collect::<Vec<_>>(), vec!["Bob", "teams"]);
    assert_eq!(all.get_raw("Bob").unwrap().type_name(), "Thingy");
}

#[tokio::test]
async fn put_replaces_existing_key() {
    let store = store().await;
    let collections = store.collections();

    collections.put("u1", "a", &1i64).await.unwrap();
    collections.put("u1", "a", &"now a string".to_string()).await.unwrap();

    assert_eq!(
        collections.get::<String>("u1", "a").await.unwrap(),
        Some("now a string".to_string())
    );
}

#[tokio::test]
async fn unregistered_put_fails_without_writing() {
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct Unknown {
        x: i32,
    }

    let store = store().await;

    let err = store
        .collections()
        .put("u1", "k", &Unknown { x: 1 })
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentStoreError::UnregisteredType(_)));
    assert!(
        store
            .backend()
            .stat_blob(BUCKET, &data_path("u1"))
            .await
            .unwrap_err()
            .is_not_found()
    );
}

#[tokio::test]
async fn get_with_wrong_type_is_a_mismatch() {
    let store = store().await;
    store.collections().put("u1", "a", &1i64).await.unwrap();

    let err = store.collections().get::<String>("u1", "a").await.unwrap_err();

    assert!(matches!(
        err,
        DocumentStoreError::TypeMismatch { ref expected, ref found } if expected == "string" && found == "int64"
    ));
}

#[tokio::test]
async fn delete_removes_only_that_key() {
    let store = store().await;
    let collections = store.collections();

    collections.put("u1", "a", &1i64).await.unwrap();
    collections.put("u1", "b", &2i64).await.unwrap();
    collections.delete("u1", "a").await.unwrap();

    assert_eq!(collections.get::<i64>("u1", "a").await.unwrap(), None);
    assert_eq!(collections.get::<i64>("u1", "b").await.unwrap(), Some(2));

    // absent key is a no-op
    collections.delete("u1", "a").await.unwrap();
    assert_eq!(collections.get_all("u1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_all_empties_but_keeps_blob() {
    let store = store().await;
    let collections = store.collections();

    collections.put("u1", "a", &1i64).await.unwrap();
    collections.put("u1", "b", &bob()).await.unwrap();
    collections.delete_all("u1").await.unwrap();

    assert!(collections.get_all("u1").await.unwrap().is_empty());
    assert!(store.backend().stat_blob(BUCKET, &data_path("u1")).await.is_ok());
}

#[tokio::test]
async fn collection_blob_layout() {
    let store = store().await;
    store.collections().put("sausheong", "123", &"x".to_string()).await.unwrap();

    let blob = store
        .backend()
        .stat_blob(BUCKET, "data/c2F1c2hlb25n")
        .await
        .unwrap();

    assert_eq!(blob.content_type, "application/octet-stream");
    assert_eq!(
        store.backend().list_blobs(BUCKET, "").await.unwrap(),
        vec!["data/c2F1c2hlb25n".to_string()]
    );
}

#[tokio::test]
async fn uids_are_isolated() {
    let store = store().await;
    let collections = store.collections();

    collections.put("u1", "k", &1i64).await.unwrap();
    collections.put("u2", "k", &2i64).await.unwrap();
    collections.delete_all("u1").await.unwrap();

    assert_eq!(collections.get::<i64>("u2", "k").await.unwrap(), Some(2));
}

#[tokio::test]
async fn concurrent_puts_keep_at_least_one_key() {
    let store = store().await;
    let collections = store.collections();

    // Unsynchronized read-modify-write: one update may be lost.
    let (a, b) = futures::join!(
        collections.put("race", "a", &1i64),
        collections.put("race", "b", &2i64),
    );
    a.unwrap();
    b.unwrap();

    let all = collections.get_all("race").await.unwrap();
    assert!(all.contains_key("a") || all.contains_key("b"));
}

#[tokio::test]
async fn reader_must_register_the_same_types() {
    let backend = blobdoc::memory::InMemoryBlobStore::new();

    let writer = BlobDocStore::open(backend.clone(), BUCKET, registry()).await.unwrap();
    writer.collections().put("u1", "Bob", &bob()).await.unwrap();

    let reader = BlobDocStore::builder(backend)
        .bucket(BUCKET)
        .registry(TypeRegistry::new())
        .read_policy(ReadPolicy::Strict)
        .build()
        .await
        .unwrap();

    assert!(matches!(
        reader.collections().get_all("u1").await,
        Err(DocumentStoreError::UnregisteredType(name)) if name == "Thingy"
    ));
}

#[tokio::test]
async fn lenient_reads_mask_backend_errors() {
    let backend = FlakyBackend::new();
    let store = store_with(backend.clone(), ReadPolicy::Lenient).await;
    store.collections().put("u1", "a", &1i64).await.unwrap();

    backend.fail_reads(true);

    assert!(store.collections().get_all("u1").await.unwrap().is_empty());
    assert_eq!(store.collections().get::<i64>("u1", "a").await.unwrap(), None);
    assert!(matches!(
        store.collections().fetch("u1").await,
        Err(DocumentStoreError::Backend(_))
    ));
}

#[tokio::test]
async fn strict_reads_surface_backend_errors() {
    let backend = FlakyBackend::new();
    let store = store_with(backend.clone(), ReadPolicy::Strict).await;
    store.collections().put("u1", "a", &1i64).await.unwrap();

    backend.fail_reads(true);

    assert!(matches!(
        store.collections().get_all("u1").await,
        Err(DocumentStoreError::Backend(_))
    ));

    // missing blobs still read as empty
    backend.fail_reads(false);
    assert!(store.collections().get_all("other").await.unwrap().is_empty());
}

#[tokio::test]
async fn mutations_do_not_overwrite_unreadable_collections() {
    let backend = FlakyBackend::new();
    let store = store_with(backend.clone(), ReadPolicy::Lenient).await;
    store.collections().put("u1", "a", &1i64).await.unwrap();

    backend.fail_reads(true);
    assert!(store.collections().put("u1", "b", &2i64).await.is_err());
    assert!(store.collections().delete("u1", "a").await.is_err());
    backend.fail_reads(false);

    let all = store.collections().get_all("u1").await.unwrap();
    assert_eq!(all.get::<i64>("a", store.registry()).unwrap(), Some(1));
    assert!(!all.contains_key("b"));
}

#[tokio::test]
async fn corrupt_blob_reads_empty_when_lenient() {
    let store = store().await;
    store
        .backend()
        .put_blob(BUCKET, &data_path("u1"), b"not bson at all".to_vec(), "application/octet-stream")
        .await
        .unwrap();

    assert!(store.collections().get_all("u1").await.unwrap().is_empty());
    assert!(
        store
            .collections()
            .fetch("u1")
            .await
            .unwrap_err()
            .is_encoding()
    );
}
