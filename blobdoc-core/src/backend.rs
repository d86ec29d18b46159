//! Blob storage backend abstraction.
//!
//! This module defines the narrow interface the document store consumes from an
//! object storage service. Everything above it (collections, raw objects, backups
//! and published assets) is composed purely out of these calls.
//!
//! # Traits
//!
//! - [`BlobBackend`]: The core trait for blob storage backends
//! - [`BlobBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use blobdoc::backend::BlobBackend;
//!
//! let backend = MyBackendImpl::new();
//!
//! backend.make_bucket("photos").await?;
//! backend.put_blob("photos", "public/cat.png", bytes, "image/png").await?;
//! let body = backend.get_blob("photos", "public/cat.png").await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::DocumentStoreResult;

/// Abstract interface for blob storage backends.
///
/// A backend stores opaque byte blobs addressed by a path inside a named bucket,
/// and carries one access-policy document per bucket.
///
/// # Thread Safety
///
/// All implementations must be thread-safe (`Send + Sync`). The store issues calls
/// concurrently from independent tasks without any locking of its own.
///
/// # Cancellation
///
/// Dropping the future returned by any method cancels the call. Implementations must
/// not assume a write that was started also completed.
///
/// # Error Handling
///
/// A read of a missing blob must return
/// [`DocumentStoreError::BlobNotFound`](crate::error::DocumentStoreError::BlobNotFound).
/// Transport, authentication and other storage failures map to
/// [`DocumentStoreError::Backend`](crate::error::DocumentStoreError::Backend).
#[async_trait]
pub trait BlobBackend: Send + Sync + Debug {
    /// Writes `body` to `path` in `bucket`, replacing any existing blob.
    ///
    /// # Arguments
    ///
    /// * `bucket` - The bucket to write into
    /// * `path` - The blob path inside the bucket
    /// * `body` - The full blob contents; its length is the blob length
    /// * `content_type` - MIME type recorded with the blob where the backend supports it
    async fn put_blob(
        &self,
        bucket: &str,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> DocumentStoreResult<()>;

    /// Reads the full contents of the blob at `path` in `bucket`.
    ///
    /// Returns `BlobNotFound` if nothing is stored at `path`.
    async fn get_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<Vec<u8>>;

    /// Removes the blob at `path` in `bucket`.
    async fn remove_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<()>;

    /// Returns whether `bucket` exists.
    async fn bucket_exists(&self, bucket: &str) -> DocumentStoreResult<bool>;

    /// Creates `bucket`.
    async fn make_bucket(&self, bucket: &str) -> DocumentStoreResult<()>;

    /// Replaces the access-policy document of `bucket` with `policy`.
    ///
    /// This is a full replacement; backends never merge statements.
    async fn set_bucket_policy(&self, bucket: &str, policy: &str) -> DocumentStoreResult<()>;

    /// Returns the current access-policy document of `bucket`.
    ///
    /// A bucket without a policy yields an empty string.
    async fn get_bucket_policy(&self, bucket: &str) -> DocumentStoreResult<String>;

    /// Returns the base URL under which the backend's buckets are reachable,
    /// without a trailing slash.
    fn endpoint_url(&self) -> String;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> BlobBackend for &B
where
    B: BlobBackend,
{
    async fn put_blob(
        &self,
        bucket: &str,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> DocumentStoreResult<()> {
        (*self)
            .put_blob(bucket, path, body, content_type)
            .await
    }

    async fn get_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<Vec<u8>> {
        (*self).get_blob(bucket, path).await
    }

    async fn remove_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<()> {
        (*self).remove_blob(bucket, path).await
    }

    async fn bucket_exists(&self, bucket: &str) -> DocumentStoreResult<bool> {
        (*self).bucket_exists(bucket).await
    }

    async fn make_bucket(&self, bucket: &str) -> DocumentStoreResult<()> {
        (*self).make_bucket(bucket).await
    }

    async fn set_bucket_policy(&self, bucket: &str, policy: &str) -> DocumentStoreResult<()> {
        (*self)
            .set_bucket_policy(bucket, policy)
            .await
    }

    async fn get_bucket_policy(&self, bucket: &str) -> DocumentStoreResult<String> {
        (*self).get_bucket_policy(bucket).await
    }

    fn endpoint_url(&self) -> String {
        (*self).endpoint_url()
    }
}

#[async_trait]
pub trait BlobBackendBuilder {
    type Backend: BlobBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
