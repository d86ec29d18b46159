mod common;

use blobdoc::{
    memory::InMemoryBlobStore,
    policy::{Effect, canned_policy},
    prelude::*,
};
use common::{BUCKET, registry, store};

#[tokio::test]
async fn public_toggle() {
    let store = store().await;
    let publisher = store.publisher();

    assert!(!publisher.is_public().await.unwrap());

    publisher.allow_public().await.unwrap();
    assert!(publisher.is_public().await.unwrap());

    publisher.deny_public().await.unwrap();
    assert!(!publisher.is_public().await.unwrap());

    assert_eq!(
        store.backend().get_bucket_policy(BUCKET).await.unwrap(),
        canned_policy(BUCKET, Effect::Deny).unwrap()
    );
}

#[tokio::test]
async fn foreign_policy_is_not_public() {
    let store = store().await;

    // same meaning, different text
    let compact: serde_json::Value =
        serde_json::from_str(&canned_policy(BUCKET, Effect::Allow).unwrap()).unwrap();
    store
        .backend()
        .set_bucket_policy(BUCKET, &compact.to_string())
        .await
        .unwrap();

    assert!(!store.publisher().is_public().await.unwrap());
}

#[tokio::test]
async fn publish_writes_under_public_prefix() {
    let store = BlobDocStore::open(
        InMemoryBlobStore::with_endpoint("http://localhost:9000/"),
        BUCKET,
        registry(),
    )
    .await
    .unwrap();

    let url = store
        .publisher()
        .publish("hello.txt", "text/plain", b"hello world!".to_vec())
        .await
        .unwrap();

    assert_eq!(url, "http://localhost:9000/gost/public/hello.txt");

    let blob = store.backend().stat_blob(BUCKET, "public/hello.txt").await.unwrap();
    assert_eq!(blob.body, b"hello world!");
    assert_eq!(blob.content_type, "text/plain");
}

#[tokio::test]
async fn publishing_does_not_change_policy() {
    let store = store().await;

    store
        .publisher()
        .publish("a.png", "image/png", vec![0x89, b'P', b'N', b'G'])
        .await
        .unwrap();

    assert!(!store.publisher().is_public().await.unwrap());
}

#[tokio::test]
async fn unpublish_removes_asset() {
    let store = store().await;
    let publisher = store.publisher();

    publisher.publish("a.txt", "text/plain", "a").await.unwrap();
    publisher.unpublish("a.txt").await.unwrap();

    assert!(
        store
            .backend()
            .stat_blob(BUCKET, "public/a.txt")
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(publisher.unpublish("a.txt").await.unwrap_err().is_not_found());
}
