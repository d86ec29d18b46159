//! In-memory blob storage implementation.
//!
//! Buckets are kept in a `HashMap` behind an async-aware read-write lock. Each bucket
//! holds its blobs (with their content types) and its policy document.

use async_trait::async_trait;
use mea::rwlock::RwLock;
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

use blobdoc_core::{
    backend::{BlobBackend, BlobBackendBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
};

/// The endpoint reported when none is configured.
pub const DEFAULT_ENDPOINT: &str = "memory://localhost";

/// A stored blob and the content type it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default)]
struct Bucket {
    blobs: HashMap<String, StoredBlob>,
    policy: String,
}

type BucketMap = HashMap<String, Bucket>;

/// Thread-safe in-memory blob storage backend.
///
/// # Thread Safety
///
/// `InMemoryBlobStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be shared across async tasks and across several document stores. Clones share
/// the same buckets.
///
/// # Example
///
/// ```ignore
/// use blobdoc_memory::InMemoryBlobStore;
/// use blobdoc::backend::BlobBackend;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let backend = InMemoryBlobStore::new();
///
///     backend.make_bucket("gost").await?;
///     backend.put_blob("gost", "public/a.txt", b"hi".to_vec(), "text/plain").await?;
///     assert_eq!(backend.get_blob("gost", "public/a.txt").await?, b"hi");
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryBlobStore {
    buckets: Arc<RwLock<BucketMap>>,
    endpoint: String,
}

impl InMemoryBlobStore {
    /// Creates a new backend without buckets, reporting [`DEFAULT_ENDPOINT`].
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Creates a new backend without buckets, reporting `endpoint` as its URL.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            buckets: Arc::new(RwLock::new(BucketMap::new())),
            endpoint: endpoint.into(),
        }
    }

    /// Creates a builder for constructing an `InMemoryBlobStore` with custom options.
    pub fn builder() -> InMemoryBlobStoreBuilder {
        InMemoryBlobStoreBuilder::default()
    }

    /// Returns the blob at `path` together with its content type.
    ///
    /// Useful for inspecting what the store wrote without decoding it.
    pub async fn stat_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<StoredBlob> {
        let buckets = self.buckets.read().await;

        buckets
            .get(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?
            .blobs
            .get(path)
            .cloned()
            .ok_or_else(|| DocumentStoreError::BlobNotFound(bucket.to_string(), path.to_string()))
    }

    /// Lists the blob paths in `bucket` that start with `prefix`, sorted.
    pub async fn list_blobs(&self, bucket: &str, prefix: &str) -> DocumentStoreResult<Vec<String>> {
        let buckets = self.buckets.read().await;
        let mut paths = buckets
            .get(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?
            .blobs
            .keys()
            .filter(|path| path.starts_with(prefix))
            .cloned()
            .collect::<Vec<_>>();

        paths.sort();

        Ok(paths)
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

fn no_such_bucket(bucket: &str) -> DocumentStoreError {
    DocumentStoreError::Backend(format!("bucket {bucket} does not exist"))
}

#[async_trait]
impl BlobBackend for InMemoryBlobStore {
    async fn put_blob(
        &self,
        bucket: &str,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> DocumentStoreResult<()> {
        let mut buckets = self.buckets.write().await;
        let blobs = &mut buckets
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?
            .blobs;

        debug!(bucket = %bucket, path = %path, bytes = body.len(), "storing blob in memory");

        blobs.insert(
            path.to_string(),
            StoredBlob {
                body,
                content_type: content_type.to_string(),
            },
        );

        Ok(())
    }

    async fn get_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<Vec<u8>> {
        Ok(self.stat_blob(bucket, path).await?.body)
    }

    async fn remove_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<()> {
        let mut buckets = self.buckets.write().await;
        let blobs = &mut buckets
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?
            .blobs;

        if blobs.remove(path).is_none() {
            return Err(DocumentStoreError::BlobNotFound(bucket.to_string(), path.to_string()));
        }

        Ok(())
    }

    async fn bucket_exists(&self, bucket: &str) -> DocumentStoreResult<bool> {
        Ok(self.buckets.read().await.contains_key(bucket))
    }

    async fn make_bucket(&self, bucket: &str) -> DocumentStoreResult<()> {
        let mut buckets = self.buckets.write().await;

        if buckets.contains_key(bucket) {
            return Err(DocumentStoreError::Backend(format!("bucket {bucket} already exists")));
        }

        buckets.insert(bucket.to_string(), Bucket::default());

        Ok(())
    }

    async fn set_bucket_policy(&self, bucket: &str, policy: &str) -> DocumentStoreResult<()> {
        let mut buckets = self.buckets.write().await;

        buckets
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?
            .policy = policy.to_string();

        Ok(())
    }

    async fn get_bucket_policy(&self, bucket: &str) -> DocumentStoreResult<String> {
        Ok(self
            .buckets
            .read()
            .await
            .get(bucket)
            .ok_or_else(|| no_such_bucket(bucket))?
            .policy
            .clone())
    }

    fn endpoint_url(&self) -> String {
        self.endpoint.clone()
    }
}

/// Builder for constructing [`InMemoryBlobStore`] instances.
///
/// # Example
///
/// ```ignore
/// use blobdoc_memory::InMemoryBlobStore;
/// use blobdoc::backend::BlobBackendBuilder;
///
/// let backend = InMemoryBlobStore::builder()
///     .endpoint("http://localhost:9000")
///     .bucket("gost")
///     .build()
///     .await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBlobStoreBuilder {
    endpoint: Option<String>,
    buckets: Vec<String>,
}

impl InMemoryBlobStoreBuilder {
    /// Sets the endpoint URL reported by the backend.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Pre-creates a bucket.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.buckets.push(bucket.into());
        self
    }
}

#[async_trait]
impl BlobBackendBuilder for InMemoryBlobStoreBuilder {
    type Backend = InMemoryBlobStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let backend = InMemoryBlobStore::with_endpoint(
            self.endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        );

        {
            let mut buckets = backend.buckets.write().await;
            for bucket in self.buckets {
                buckets.entry(bucket).or_default();
            }
        }

        Ok(backend)
    }
}
