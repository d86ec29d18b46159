//! Convenient re-exports of commonly used types from blobdoc.
//!
//! ```ignore
//! use blobdoc::prelude::*;
//! ```

pub use blobdoc_core::{
    backend::{BlobBackend, BlobBackendBuilder},
    backup::BackupManager,
    collection::CollectionStore,
    config::{ReadPolicy, StoreConfig},
    error::{DocumentStoreError, DocumentStoreResult},
    object::ObjectStore,
    publish::PublishManager,
    registry::TypeRegistry,
    store::{BlobDocStore, BlobDocStoreBuilder},
    value::{Collection, Storable, StorableExt, TypedValue},
};
