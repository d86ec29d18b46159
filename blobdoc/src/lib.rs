//! Main blobdoc crate providing a schemaless document store on top of blob storage.
//!
//! This crate is the primary entry point for users of blobdoc. It re-exports the core
//! types from the sub-crates and gives access to the available backends.
//!
//! # Features
//!
//! - **Per-uid collections** - Heterogeneous key/value mappings, one blob per uid
//! - **Explicit type registry** - Every stored type is registered by name, per store
//! - **Raw objects** - Single values at caller-chosen paths
//! - **Backups** - One snapshot per uid, restored as a full overwrite
//! - **Publishing** - Assets under `public/` and a canned public-read bucket policy
//!
//! # Quick Start
//!
//! ```ignore
//! use blobdoc::{prelude::*, memory::InMemoryBlobStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct OtherThingy {
//!     pub name: String,
//!     pub number: i32,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut registry = TypeRegistry::new();
//!     registry.register::<OtherThingy>("OtherThingy").unwrap();
//!     registry.register::<Vec<OtherThingy>>("[]OtherThingy").unwrap();
//!
//!     let store = BlobDocStore::open(InMemoryBlobStore::new(), "gost", registry)
//!         .await
//!         .unwrap();
//!
//!     // Collections: whole-blob read-modify-write per uid
//!     let collections = store.collections();
//!     collections.put("sausheong", "123", &"hello world!".to_string()).await.unwrap();
//!     let greeting: Option<String> = collections.get("sausheong", "123").await.unwrap();
//!
//!     // Raw objects at arbitrary paths
//!     let things = vec![
//!         OtherThingy { name: "Bob".into(), number: 1 },
//!         OtherThingy { name: "Alice".into(), number: 2 },
//!     ];
//!     store.objects().put_object("some-things", &things).await.unwrap();
//!
//!     // Snapshot and restore
//!     store.backups().backup("sausheong").await.unwrap();
//!     store.backups().restore("sausheong").await.unwrap();
//!
//!     // Publishing
//!     let url = store
//!         .publisher()
//!         .publish("hello.txt", "text/plain", b"hi".to_vec())
//!         .await
//!         .unwrap();
//!     store.publisher().allow_public().await.unwrap();
//!
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Read policy
//!
//! A uid that was never written always reads as an empty collection. What happens when
//! a collection read fails for another reason (backend outage, undecodable blob) is set
//! per store with [`config::ReadPolicy`]: `Lenient` (default) logs through `tracing` and
//! returns an empty collection, `Strict` returns the error.
//!
//! ```ignore
//! let store = BlobDocStore::builder(backend)
//!     .bucket("gost")
//!     .read_policy(ReadPolicy::Strict)
//!     .build()
//!     .await?;
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`fs`] - Local filesystem storage (requires `fs` feature)

pub mod prelude;

pub use blobdoc_core::{
    backend, backup, codec, collection, config, error, object, paths, policy, publish, registry,
    store, value,
};

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use blobdoc_memory::{InMemoryBlobStore, InMemoryBlobStoreBuilder, StoredBlob};
}

/// Local filesystem storage backend implementations.
///
/// This module is only available when the `fs` feature is enabled.
#[cfg(feature = "fs")]
pub mod fs {
    pub use blobdoc_fs::{FsBlobStore, FsBlobStoreBuilder, FsBlobStoreConfig};
}
