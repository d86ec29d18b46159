//! Uid-addressed key/value collections.
//!
//! Every uid owns one collection, stored as a single blob at `data/<base64(uid)>`.
//! All mutations are whole-blob read-modify-write cycles: load the collection, change
//! it in memory, encode it, and write it back in full.
//!
//! # Consistency
//!
//! Nothing serializes two mutations of the same uid. Two concurrent writers both read
//! the old collection and the last write wins in full, so one writer's change can be
//! lost without an error. Callers that need stronger guarantees must serialize writes
//! per uid themselves.
//!
//! # Example
//!
//! ```ignore
//! let collections = store.collections();
//!
//! collections.put("sausheong", "123", &"hello world!".to_string()).await?;
//! let greeting: Option<String> = collections.get("sausheong", "123").await?;
//! ```

use tracing::{debug, warn};

use crate::{
    backend::BlobBackend,
    codec::{CONTENT_TYPE, decode_collection, encode_collection},
    config::ReadPolicy,
    error::DocumentStoreResult,
    paths::data_path,
    store::StoreRef,
    value::{Collection, Storable, TypedValue},
};

/// Handle for collection operations on a store.
#[derive(Debug)]
pub struct CollectionStore<'a, B: BlobBackend> {
    store: StoreRef<'a, B>,
}

impl<'a, B: BlobBackend> CollectionStore<'a, B> {
    pub(crate) fn new(store: StoreRef<'a, B>) -> Self {
        Self { store }
    }

    /// Sets `key` to `value` in the collection of `uid`.
    ///
    /// The value is encoded before anything is read, so an unregistered type fails
    /// without touching the backend.
    ///
    /// # Errors
    ///
    /// - [`DocumentStoreError::UnregisteredType`](crate::error::DocumentStoreError::UnregisteredType)
    ///   if `T` is not registered
    /// - any error from [`fetch`](Self::fetch); the collection is not overwritten when the
    ///   current contents could not be read
    /// - backend errors from the write
    pub async fn put<T: Storable>(&self, uid: &str, key: &str, value: &T) -> DocumentStoreResult<()> {
        let value = TypedValue::encode(value, self.store.registry)?;

        self.put_raw(uid, key, value).await
    }

    /// Sets `key` to an already encoded value.
    pub async fn put_raw(&self, uid: &str, key: &str, value: TypedValue) -> DocumentStoreResult<()> {
        let mut collection = self.fetch(uid).await?;
        collection.insert(key, value);

        self.write_at(&data_path(uid), &collection).await
    }

    /// Returns the value at `key` decoded as `T`, or `None` if `key` is unset.
    ///
    /// Reads the whole collection with [`get_all`](Self::get_all) semantics.
    ///
    /// # Errors
    ///
    /// [`TypeMismatch`](crate::error::DocumentStoreError::TypeMismatch) if the value was
    /// stored as another type, plus whatever `get_all` surfaces under the store's read policy.
    pub async fn get<T: Storable>(&self, uid: &str, key: &str) -> DocumentStoreResult<Option<T>> {
        self.get_all(uid)
            .await?
            .get(key, self.store.registry)
    }

    /// Returns the undecoded value at `key`, or `None` if `key` is unset.
    pub async fn get_raw(&self, uid: &str, key: &str) -> DocumentStoreResult<Option<TypedValue>> {
        Ok(self.get_all(uid).await?.remove(key))
    }

    /// Returns the full collection of `uid`.
    ///
    /// A uid that was never written reads as an empty collection. Other failures follow
    /// the store's [`ReadPolicy`]: `Lenient` logs them and returns an empty collection,
    /// `Strict` returns them.
    pub async fn get_all(&self, uid: &str) -> DocumentStoreResult<Collection> {
        self.read_at_with_policy(&data_path(uid)).await
    }

    /// Returns the full collection of `uid`, surfacing every failure except a missing blob.
    ///
    /// Unlike [`get_all`](Self::get_all) this ignores the read policy, so a backend error
    /// and an empty collection can always be told apart.
    pub async fn fetch(&self, uid: &str) -> DocumentStoreResult<Collection> {
        self.read_at(&data_path(uid)).await
    }

    /// Removes `key` from the collection of `uid`. Removing an unset key still rewrites
    /// the blob.
    pub async fn delete(&self, uid: &str, key: &str) -> DocumentStoreResult<()> {
        let mut collection = self.fetch(uid).await?;
        collection.remove(key);

        self.write_at(&data_path(uid), &collection).await
    }

    /// Replaces the collection of `uid` with an empty one. The blob keeps existing.
    pub async fn delete_all(&self, uid: &str) -> DocumentStoreResult<()> {
        self.write_at(&data_path(uid), &Collection::new()).await
    }

    pub(crate) async fn read_at(&self, path: &str) -> DocumentStoreResult<Collection> {
        match self.store.backend.get_blob(self.store.bucket, path).await {
            Ok(bytes) => decode_collection(&bytes, self.store.registry),
            Err(err) if err.is_not_found() => {
                debug!(bucket = %self.store.bucket, path = %path, "no blob, reading as empty collection");
                Ok(Collection::new())
            }
            Err(err) => Err(err),
        }
    }

    pub(crate) async fn read_at_with_policy(&self, path: &str) -> DocumentStoreResult<Collection> {
        match self.read_at(path).await {
            Ok(collection) => Ok(collection),
            Err(err) if self.store.read_policy == ReadPolicy::Strict => Err(err),
            Err(err) => {
                warn!(
                    bucket = %self.store.bucket,
                    path = %path,
                    error = %err,
                    "cannot read collection, continuing with an empty one"
                );
                Ok(Collection::new())
            }
        }
    }

    pub(crate) async fn write_at(&self, path: &str, collection: &Collection) -> DocumentStoreResult<()> {
        let body = encode_collection(collection)?;

        debug!(
            bucket = %self.store.bucket,
            path = %path,
            keys = collection.len(),
            bytes = body.len(),
            "writing collection"
        );

        self.store
            .backend
            .put_blob(self.store.bucket, path, body, CONTENT_TYPE)
            .await
    }
}
