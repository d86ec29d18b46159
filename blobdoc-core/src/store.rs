//! Main store interface tying a blob backend, a bucket and a type registry together.
//!
//! A [`BlobDocStore`] owns its backend and hands out short-lived handles for each
//! group of operations:
//!
//! - [`BlobDocStore::collections`] - per-uid key/value collections
//! - [`BlobDocStore::objects`] - single values at caller-chosen paths
//! - [`BlobDocStore::backups`] - single-slot snapshots of collections
//! - [`BlobDocStore::publisher`] - public assets and the public-read policy
//!
//! # Example
//!
//! ```ignore
//! use blobdoc::{prelude::*, memory::InMemoryBlobStore};
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Thingy>("Thingy")?;
//!
//! let store = BlobDocStore::builder(InMemoryBlobStore::new())
//!     .bucket("gost")
//!     .registry(registry)
//!     .build()
//!     .await?;
//!
//! store.collections().put("sausheong", "Bob", &thingy).await?;
//! ```

use tracing::info;

use crate::{
    backend::BlobBackend,
    backup::BackupManager,
    collection::CollectionStore,
    config::{ReadPolicy, StoreConfig},
    error::{DocumentStoreError, DocumentStoreResult},
    object::ObjectStore,
    publish::PublishManager,
    registry::TypeRegistry,
};

/// A document store bound to one bucket of a blob backend.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct BlobDocStore<B: BlobBackend> {
    backend: B,
    bucket: String,
    registry: TypeRegistry,
    read_policy: ReadPolicy,
}

impl<B: BlobBackend> BlobDocStore<B> {
    /// Creates a builder for a store over `backend`.
    pub fn builder(backend: B) -> BlobDocStoreBuilder<B> {
        BlobDocStoreBuilder::new(backend)
    }

    /// Opens a store on `bucket` with the default read policy, creating the bucket if it
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Initialization`] if the bucket cannot be checked or created.
    pub async fn open(
        backend: B,
        bucket: impl Into<String>,
        registry: TypeRegistry,
    ) -> DocumentStoreResult<Self> {
        Self::builder(backend)
            .bucket(bucket)
            .registry(registry)
            .build()
            .await
    }

    /// Operations on uid-addressed collections.
    pub fn collections(&self) -> CollectionStore<'_, B> {
        CollectionStore::new(self.view())
    }

    /// Operations on raw single-value objects.
    pub fn objects(&self) -> ObjectStore<'_, B> {
        ObjectStore::new(self.view())
    }

    /// Backup and restore of collections.
    pub fn backups(&self) -> BackupManager<'_, B> {
        BackupManager::new(self.view())
    }

    /// Publishing of public assets and the public-read policy toggle.
    pub fn publisher(&self) -> PublishManager<'_, B> {
        PublishManager::new(self.view())
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await?;

        Ok(())
    }

    fn view(&self) -> StoreRef<'_, B> {
        StoreRef {
            backend: &self.backend,
            bucket: &self.bucket,
            registry: &self.registry,
            read_policy: self.read_policy,
        }
    }
}

/// Borrowed view of a store shared by the operation handles.
#[derive(Debug)]
pub(crate) struct StoreRef<'a, B: BlobBackend> {
    pub(crate) backend: &'a B,
    pub(crate) bucket: &'a str,
    pub(crate) registry: &'a TypeRegistry,
    pub(crate) read_policy: ReadPolicy,
}

impl<B: BlobBackend> Clone for StoreRef<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: BlobBackend> Copy for StoreRef<'_, B> {}

/// Builder for [`BlobDocStore`].
///
/// `build` validates the settings and performs the one-time bucket check-and-create.
#[derive(Debug)]
pub struct BlobDocStoreBuilder<B: BlobBackend> {
    backend: B,
    bucket: Option<String>,
    registry: TypeRegistry,
    read_policy: ReadPolicy,
}

impl<B: BlobBackend> BlobDocStoreBuilder<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bucket: None,
            registry: TypeRegistry::new(),
            read_policy: ReadPolicy::default(),
        }
    }

    /// Sets the bucket. Required.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Sets the type registry. Defaults to [`TypeRegistry::new`].
    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the read policy. Defaults to [`ReadPolicy::Lenient`].
    pub fn read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }

    /// Applies every setting from `config`.
    pub fn config(self, config: StoreConfig) -> Self {
        self.bucket(config.bucket)
            .read_policy(config.read_policy)
    }

    /// Builds the store, creating the bucket if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::Initialization`] if no bucket was set, or if the
    /// bucket cannot be checked or created.
    pub async fn build(self) -> DocumentStoreResult<BlobDocStore<B>> {
        let bucket = self
            .bucket
            .filter(|bucket| !bucket.is_empty())
            .ok_or_else(|| DocumentStoreError::Initialization("bucket name is required".into()))?;

        let exists = self
            .backend
            .bucket_exists(&bucket)
            .await
            .map_err(|e| {
                DocumentStoreError::Initialization(format!("cannot check bucket {bucket}: {e}"))
            })?;

        if !exists {
            self.backend
                .make_bucket(&bucket)
                .await
                .map_err(|e| {
                    DocumentStoreError::Initialization(format!("cannot create bucket {bucket}: {e}"))
                })?;

            info!(bucket = %bucket, "created bucket");
        }

        Ok(BlobDocStore {
            backend: self.backend,
            bucket,
            registry: self.registry,
            read_policy: self.read_policy,
        })
    }
}
