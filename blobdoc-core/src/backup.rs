//! Single-slot backups of collections.
//!
//! Each uid has at most one snapshot, stored at `backup/<base64(uid)>`. Taking a new
//! backup silently replaces the previous one. Restoring copies the snapshot over the
//! live collection and never touches the snapshot itself.
//!
//! | before restore | after restore |
//! |---|---|
//! | any data, no backup | empty collection |
//! | any data, backup of `S` | collection `S` |
//! | any data, unreadable backup | unchanged, the error is returned |

use tracing::debug;

use crate::{
    backend::BlobBackend,
    collection::CollectionStore,
    error::DocumentStoreResult,
    paths::{backup_path, data_path},
    store::StoreRef,
    value::Collection,
};

/// Handle for backup operations on a store.
#[derive(Debug)]
pub struct BackupManager<'a, B: BlobBackend> {
    collections: CollectionStore<'a, B>,
}

impl<'a, B: BlobBackend> BackupManager<'a, B> {
    pub(crate) fn new(store: StoreRef<'a, B>) -> Self {
        Self {
            collections: CollectionStore::new(store),
        }
    }

    /// Snapshots the current collection of `uid`, replacing any previous snapshot.
    ///
    /// The collection is read with [`CollectionStore::get_all`] semantics; under the
    /// lenient read policy a failed read snapshots an empty collection.
    pub async fn backup(&self, uid: &str) -> DocumentStoreResult<()> {
        let collection = self.collections.get_all(uid).await?;

        debug!(uid = %uid, keys = collection.len(), "backing up collection");

        self.collections
            .write_at(&backup_path(uid), &collection)
            .await
    }

    /// Returns the snapshot of `uid` for inspection.
    ///
    /// A missing snapshot reads as an empty collection; other failures follow the
    /// store's read policy. The live collection is not affected.
    pub async fn load(&self, uid: &str) -> DocumentStoreResult<Collection> {
        self.collections
            .read_at_with_policy(&backup_path(uid))
            .await
    }

    /// Overwrites the live collection of `uid` with its snapshot.
    ///
    /// This is a full replacement, not a merge: keys written since the last backup are
    /// gone afterwards. Without a snapshot the live collection becomes empty. If the
    /// snapshot exists but cannot be read or decoded, the error is returned and the live
    /// collection is left alone, regardless of the read policy.
    pub async fn restore(&self, uid: &str) -> DocumentStoreResult<()> {
        let snapshot = self.collections.read_at(&backup_path(uid)).await?;

        debug!(uid = %uid, keys = snapshot.len(), "restoring collection");

        self.collections
            .write_at(&data_path(uid), &snapshot)
            .await
    }
}
