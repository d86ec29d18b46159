//! In-memory blob storage backend for blobdoc.
//!
//! This crate provides a thread-safe, in-memory implementation of the `BlobBackend` trait.
//! It uses async-aware read-write locks for concurrent access and is meant for
//! development and tests.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Bucket policies** - Stores the policy document of each bucket verbatim
//! - **Configurable endpoint** - Reports any base URL, so published locations look real
//!
//! # Quick Start
//!
//! ```ignore
//! use blobdoc::{prelude::*, memory::InMemoryBlobStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = BlobDocStore::open(InMemoryBlobStore::new(), "gost", TypeRegistry::new()).await?;
//!
//!     store.collections().put("sausheong", "123", &"hello world!".to_string()).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as blobdoc_memory;

pub mod store;

pub use store::{InMemoryBlobStore, InMemoryBlobStoreBuilder, StoredBlob};
