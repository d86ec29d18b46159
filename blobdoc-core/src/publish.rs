//! Public assets and the bucket-wide public-read toggle.
//!
//! Assets are written under `public/`. Writing one does not make it readable by
//! anonymous clients; that is decided only by the bucket policy, which is one of two
//! canned documents (see [`crate::policy`]). Setting either document replaces the
//! bucket's whole policy, discarding anything else that was configured there.

use tracing::debug;

use crate::{
    backend::BlobBackend,
    error::DocumentStoreResult,
    paths::public_path,
    policy::{Effect, canned_policy},
    store::StoreRef,
};

/// Handle for publishing operations on a store.
#[derive(Debug)]
pub struct PublishManager<'a, B: BlobBackend> {
    store: StoreRef<'a, B>,
}

impl<'a, B: BlobBackend> PublishManager<'a, B> {
    pub(crate) fn new(store: StoreRef<'a, B>) -> Self {
        Self { store }
    }

    /// Writes `data` to `public/<filename>` and returns the URL it is served under.
    ///
    /// The URL is `<endpoint>/<bucket>/public/<filename>`; whether it is fetchable
    /// anonymously depends on [`allow_public`](Self::allow_public).
    pub async fn publish(
        &self,
        filename: &str,
        content_type: &str,
        data: impl Into<Vec<u8>>,
    ) -> DocumentStoreResult<String> {
        let path = public_path(filename);

        self.store
            .backend
            .put_blob(self.store.bucket, &path, data.into(), content_type)
            .await?;

        Ok(self.location(&path))
    }

    /// Removes `public/<filename>`.
    pub async fn unpublish(&self, filename: &str) -> DocumentStoreResult<()> {
        self.store
            .backend
            .remove_blob(self.store.bucket, &public_path(filename))
            .await
    }

    /// Replaces the bucket policy with one granting anonymous reads on `public/*`.
    pub async fn allow_public(&self) -> DocumentStoreResult<()> {
        self.set_policy(Effect::Allow).await
    }

    /// Replaces the bucket policy with one denying anonymous reads on `public/*`.
    pub async fn deny_public(&self) -> DocumentStoreResult<()> {
        self.set_policy(Effect::Deny).await
    }

    /// Returns whether the bucket policy is exactly the canned allow document.
    ///
    /// The comparison is textual. A policy with the same meaning but different key
    /// order or whitespace, e.g. one set by another tool, reads as not public.
    pub async fn is_public(&self) -> DocumentStoreResult<bool> {
        let current = self
            .store
            .backend
            .get_bucket_policy(self.store.bucket)
            .await?;

        Ok(current == canned_policy(self.store.bucket, Effect::Allow)?)
    }

    async fn set_policy(&self, effect: Effect) -> DocumentStoreResult<()> {
        let policy = canned_policy(self.store.bucket, effect)?;

        debug!(bucket = %self.store.bucket, effect = ?effect, "replacing bucket policy");

        self.store
            .backend
            .set_bucket_policy(self.store.bucket, &policy)
            .await
    }

    fn location(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.store.backend.endpoint_url().trim_end_matches('/'),
            self.store.bucket,
            path
        )
    }
}
