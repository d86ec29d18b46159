//! Store configuration.
//!
//! [`StoreConfig`] carries the settings a [`BlobDocStore`](crate::store::BlobDocStore)
//! needs besides its backend and registry. It derives `Deserialize` so it can be
//! embedded in an application's own configuration file and handed to
//! [`BlobDocStoreBuilder::config`](crate::store::BlobDocStoreBuilder::config).

use serde::{Deserialize, Serialize};

/// How collection reads react to failures other than a missing blob.
///
/// A missing blob always reads as an empty collection. This policy only decides what
/// happens on backend errors and undecodable payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadPolicy {
    /// Log the failure and return an empty collection.
    ///
    /// A transient outage then looks exactly like a uid without data.
    #[default]
    Lenient,
    /// Return the error to the caller.
    Strict,
}

/// Settings for a single store instance.
///
/// # Example
///
/// ```ignore
/// let config: StoreConfig = serde_json::from_str(r#"{ "bucket": "gost", "read_policy": "strict" }"#)?;
/// let store = BlobDocStore::builder(backend).config(config).build().await?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The bucket every blob of this store lives in. Created on build if missing.
    pub bucket: String,
    /// Failure handling for collection and backup reads.
    #[serde(default)]
    pub read_policy: ReadPolicy,
}

impl StoreConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            read_policy: ReadPolicy::default(),
        }
    }
}
