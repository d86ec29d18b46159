use async_trait::async_trait;
use object_store::{ObjectStore, PutPayload, local::LocalFileSystem, path::Path};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, info};

use blobdoc_core::{
    backend::{BlobBackend, BlobBackendBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
};

/// Directory under the root that holds one `<bucket>.json` policy file per bucket.
///
/// Underscores are not valid in S3 bucket names, so this never collides with a bucket.
const POLICY_DIR: &str = "_policies";

/// Settings for an [`FsBlobStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsBlobStoreConfig {
    /// Root directory; every bucket is a subdirectory of it.
    pub root: PathBuf,
    /// Base URL reported for published assets. Defaults to `file://<root>`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FsBlobStore {
    object_store: Arc<dyn ObjectStore>,
    root: PathBuf,
    endpoint: String,
}

impl FsBlobStore {
    pub fn builder(root: impl Into<PathBuf>) -> FsBlobStoreBuilder {
        FsBlobStoreBuilder::new(root)
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Every blob is one file directly inside its bucket directory, any `/` in `path`
    /// is percent-encoded into the file name.
    fn blob_path(bucket: &str, path: &str) -> Path {
        Path::from_iter([bucket, path])
    }

    fn policy_path(bucket: &str) -> Path {
        Path::from_iter([POLICY_DIR.to_string(), format!("{bucket}.json")])
    }

    fn map_error(bucket: &str, path: &str, err: object_store::Error) -> DocumentStoreError {
        match err {
            object_store::Error::NotFound { .. } => {
                DocumentStoreError::BlobNotFound(bucket.to_string(), path.to_string())
            }
            other => DocumentStoreError::Backend(other.to_string()),
        }
    }

    async fn read(&self, location: &Path) -> Result<Vec<u8>, object_store::Error> {
        Ok(self.object_store.get(location).await?.bytes().await?.to_vec())
    }
}

#[async_trait]
impl BlobBackend for FsBlobStore {
    async fn put_blob(
        &self,
        bucket: &str,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> DocumentStoreResult<()> {
        // Local files carry no attributes, the content type is not persisted.
        debug!(bucket = %bucket, path = %path, content_type = %content_type, bytes = body.len(), "writing blob file");

        self.object_store
            .put(&Self::blob_path(bucket, path), PutPayload::from(body))
            .await
            .map_err(|e| Self::map_error(bucket, path, e))?;

        Ok(())
    }

    async fn get_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<Vec<u8>> {
        self.read(&Self::blob_path(bucket, path))
            .await
            .map_err(|e| Self::map_error(bucket, path, e))
    }

    async fn remove_blob(&self, bucket: &str, path: &str) -> DocumentStoreResult<()> {
        self.object_store
            .delete(&Self::blob_path(bucket, path))
            .await
            .map_err(|e| Self::map_error(bucket, path, e))
    }

    async fn bucket_exists(&self, bucket: &str) -> DocumentStoreResult<bool> {
        tokio::fs::try_exists(self.root.join(bucket))
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))
    }

    async fn make_bucket(&self, bucket: &str) -> DocumentStoreResult<()> {
        tokio::fs::create_dir_all(self.root.join(bucket))
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))
    }

    async fn set_bucket_policy(&self, bucket: &str, policy: &str) -> DocumentStoreResult<()> {
        self.object_store
            .put(
                &Self::policy_path(bucket),
                PutPayload::from(policy.as_bytes().to_vec()),
            )
            .await
            .map_err(|e| DocumentStoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn get_bucket_policy(&self, bucket: &str) -> DocumentStoreResult<String> {
        match self.read(&Self::policy_path(bucket)).await {
            Ok(bytes) => String::from_utf8(bytes)
                .map_err(|e| DocumentStoreError::Backend(format!("policy of {bucket} is not utf-8: {e}"))),
            Err(object_store::Error::NotFound { .. }) => Ok(String::new()),
            Err(e) => Err(DocumentStoreError::Backend(e.to_string())),
        }
    }

    fn endpoint_url(&self) -> String {
        self.endpoint.clone()
    }
}

#[derive(Debug)]
pub struct FsBlobStoreBuilder {
    root: PathBuf,
    endpoint: Option<String>,
}

impl FsBlobStoreBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            endpoint: None,
        }
    }

    pub fn from_config(config: FsBlobStoreConfig) -> Self {
        Self {
            root: config.root,
            endpoint: config.endpoint,
        }
    }

    /// Overrides the base URL reported for published assets.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

#[async_trait]
impl BlobBackendBuilder for FsBlobStoreBuilder {
    type Backend = FsBlobStore;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DocumentStoreError::Initialization(format!("cannot create {}: {e}", self.root.display())))?;

        let local = LocalFileSystem::new_with_prefix(&self.root)
            .map_err(|e| DocumentStoreError::Initialization(e.to_string()))?;
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| format!("file://{}", self.root.display()));

        info!(root = %self.root.display(), endpoint = %endpoint, "using local blob storage");

        Ok(FsBlobStore {
            object_store: Arc::new(local),
            root: self.root,
            endpoint,
        })
    }
}
