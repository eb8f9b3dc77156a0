use async_trait::async_trait;
use url::Url;

use crate::error::Result;

/// Write behaviour for [`ImageStore::upload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    /// Replace an existing blob at the same path instead of failing.
    pub overwrite: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

// Binary blob storage for profile images
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(
        &self,
        path: &str,
        bytes: &[u8],
        options: UploadOptions,
    ) -> Result<()>;

    /// Public URL for `path`. Does not check that the blob exists.
    fn public_url(&self, path: &str) -> Result<Url>;
}
