#![allow(dead_code)]

use async_trait::async_trait;
use blobdoc::{memory::InMemoryBlobStore, prelude::*};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

pub const BUCKET: &str = "gost";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thingy {
    pub name: String,
    pub age: i64,
    pub date_created: DateTime<Utc>,
    pub length: f64,
    pub bunch: Vec<OtherThingy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherThingy {
    pub name: String,
    pub number: i32,
}

pub fn bob() -> Thingy {
    Thingy {
        name: "Bob".into(),
        age: 42,
        date_created: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        length: 1.234,
        bunch: vec![
            OtherThingy { name: "Alice".into(), number: 1 },
            OtherThingy { name: "Bob".into(), number: 2 },
        ],
    }
}

pub fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register::<Thingy>("Thingy")
        .unwrap()
        .register::<OtherThingy>("OtherThingy")
        .unwrap()
        .register::<Vec<OtherThingy>>("[]OtherThingy")
        .unwrap()
        .register::<HashMap<String, Vec<OtherThingy>>>("map[string][]OtherThingy")
        .unwrap();
    registry
}

pub async fn store() -> BlobDocStore<InMemoryBlobStore> {
    BlobDocStore::open(InMemoryBlobStore::new(), BUCKET, registry())
        .await
        .unwrap()
}

pub async fn store_with(backend: FlakyBackend, read_policy: ReadPolicy) -> BlobDocStore<FlakyBackend> {
    BlobDocStore::builder(backend)
        .bucket(BUCKET)
        .registry(registry())
        .read_policy(read_policy)
        .build()
        .await
        .unwrap()
}

/// Memory backend whose reads can be switched to fail with a backend error.
#[derive(Debug, Clone, Default)]
pub struct FlakyBackend {
    pub inner: InMemoryBlobStore,
    fail_reads: Arc<AtomicBool>,
}

impl FlakyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlobBackend for FlakyBackend {
    async fn put_blob(
        &self,
        bucket: &str,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> DocumentStoreResult<()> {
        self.inner.put_blob(bucket, path, body, content_type).await
    }

    async fn get_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<Vec<u8>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DocumentStoreError::Backend("connection reset".into()));
        }

        self.inner.get_blob(bucket, path).await
    }

    async fn remove_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<()> {
        self.inner.remove_blob(bucket, path).await
    }

    async fn bucket_exists(&self, bucket: &str) -> DocumentStoreResult<bool> {
        self.inner.bucket_exists(bucket).await
    }

    async fn make_bucket(&self, bucket: &str) -> DocumentStoreResult<()> {
        self.inner.make_bucket(bucket).await
    }

    async fn set_bucket_policy(&self, bucket: &str, policy: &str) -> DocumentStoreResult<()> {
        self.inner.set_bucket_policy(bucket, policy).await
    }

    async fn get_bucket_policy(&self, bucket: &str) -> DocumentStoreResult<String> {
        self.inner.get_bucket_policy(bucket).await
    }

    fn endpoint_url(&self) -> String {
        self.inner.endpoint_url()
    }
}
