//! Local filesystem backend for blobdoc.
//!
//! This crate provides a persistent implementation of the `BlobBackend` trait on top of
//! the [`object_store`] crate's `LocalFileSystem`. Buckets are directories below a root
//! directory and blobs are files inside them.
//!
//! To use this backend, include the `fs` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! blobdoc = { version = "x.y.z", features = ["fs"] }
//! ```
//!
//! # Layout
//!
//! ```text
//! <root>/<bucket>/data%2F<base64(uid)>
//! <root>/<bucket>/backup%2F<base64(uid)>
//! <root>/<bucket>/public%2F<filename>
//! <root>/_policies/<bucket>.json
//! ```
//!
//! Each blob path is stored as a single file name with its `/` percent-encoded, so
//! paths never depend on each other as directories.
//!
//! Content types are accepted but not persisted, local files have no metadata.
//!
//! # Example
//!
//! ```ignore
//! use blobdoc::{backend::BlobBackendBuilder, fs::FsBlobStore, prelude::*};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = FsBlobStore::builder("/var/lib/blobdoc")
//!         .endpoint("http://localhost:9000")
//!         .build()
//!         .await?;
//!     let store = BlobDocStore::open(backend, "gost", TypeRegistry::new()).await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as blobdoc_fs;

pub mod store;

pub use store::{FsBlobStore, FsBlobStoreBuilder, FsBlobStoreConfig};
