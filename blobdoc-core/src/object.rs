//! Raw single-value objects at caller-chosen paths.
//!
//! Objects bypass the uid/collection layout entirely: the value is encoded on its own
//! and written verbatim to the given path. Every error is returned to the caller; a
//! missing object is a [`DocumentStoreError::BlobNotFound`](crate::error::DocumentStoreError::BlobNotFound),
//! not an empty default.

use tracing::debug;

use crate::{
    backend::BlobBackend,
    codec::{CONTENT_TYPE, decode_value, encode_value},
    error::DocumentStoreResult,
    store::StoreRef,
    value::{Storable, TypedValue},
};

/// Handle for raw-object operations on a store.
#[derive(Debug)]
pub struct ObjectStore<'a, B: BlobBackend> {
    store: StoreRef<'a, B>,
}

impl<'a, B: BlobBackend> ObjectStore<'a, B> {
    pub(crate) fn new(store: StoreRef<'a, B>) -> Self {
        Self { store }
    }

    /// Encodes `value` and writes it to `path`, replacing whatever was there.
    pub async fn put_object<T: Storable>(&self, path: &str, value: &T) -> DocumentStoreResult<()> {
        let body = encode_value(&TypedValue::encode(value, self.store.registry)?)?;

        debug!(bucket = %self.store.bucket, path = %path, bytes = body.len(), "writing object");

        self.store
            .backend
            .put_blob(self.store.bucket, path, body, CONTENT_TYPE)
            .await
    }

    /// Reads the object at `path` and decodes it as `T`.
    pub async fn get_object<T: Storable>(&self, path: &str) -> DocumentStoreResult<T> {
        self.get_object_raw(path)
            .await?
            .decode(self.store.registry)
    }

    /// Reads the object at `path` without committing to a concrete type.
    pub async fn get_object_raw(&self, path: &str) -> DocumentStoreResult<TypedValue> {
        let body = self
            .store
            .backend
            .get_blob(self.store.bucket, path)
            .await?;

        decode_value(&body, self.store.registry)
    }

    /// Removes the object at `path`.
    pub async fn delete_object(&self, path: &str) -> DocumentStoreResult<()> {
        self.store
            .backend
            .remove_blob(self.store.bucket, path)
            .await
    }
}
