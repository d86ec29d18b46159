//! A schemaless document store layered on top of blob storage.
//!
//! This crate is the core of the blobdoc project and provides:
//!
//! - **Blob backend abstraction** ([`backend`]) - The narrow interface consumed from an object store
//! - **Type registry** ([`registry`]) - The set of value types a store may encode and decode
//! - **Stored values** ([`value`]) - Tagged values and the per-uid [`Collection`](value::Collection)
//! - **Wire format** ([`codec`]) - BSON encoding of collections and raw objects
//! - **Collections** ([`collection`]) - Whole-blob read-modify-write key/value collections per uid
//! - **Raw objects** ([`object`]) - Single values at caller-chosen paths
//! - **Backups** ([`backup`]) - Single-slot snapshot and restore of collections
//! - **Publishing** ([`publish`], [`policy`]) - Public assets and the canned public-read policy
//! - **Store** ([`store`], [`config`]) - The entry point tying backend, bucket and registry together
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use blobdoc::{prelude::*, memory::InMemoryBlobStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Thingy {
//!     pub name: String,
//!     pub age: i32,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Thingy>("Thingy")?;
//!
//! let store = BlobDocStore::open(InMemoryBlobStore::new(), "gost", registry).await?;
//! store.collections().put("sausheong", "Bob", &Thingy { name: "Bob".into(), age: 42 }).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as blobdoc_core;

pub mod backend;
pub mod backup;
pub mod codec;
pub mod collection;
pub mod config;
pub mod error;
pub mod object;
pub mod paths;
pub mod policy;
pub mod publish;
pub mod registry;
pub mod store;
pub mod value;
