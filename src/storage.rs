use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::CatalogResult;

/// Blob storage for uploaded posters and attachment files, addressed by the
/// relative paths from [`crate::paths`].
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, path: &str, bytes: &[u8]) -> CatalogResult<()>;

    async fn get(&self, path: &str) -> CatalogResult<Vec<u8>>;

    /// Removing a path that does not exist is not an error.
    async fn delete(&self, path: &str) -> CatalogResult<()>;
}

/// Best-effort removal of a blob that no row references any more.
pub(crate) async fn discard(store: &dyn BlobStore, path: &str) {
    if let Err(err) = store.delete(path).await {
        warn!(path = %path, error = %err, "failed to remove blob");
    }
}

/// Stores blobs as files under a media root directory.
#[derive(Clone, Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> CatalogResult<()> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        debug!(path = %path, size = bytes.len(), "stored blob");
        Ok(())
    }

    async fn get(&self, path: &str) -> CatalogResult<Vec<u8>> {
        Ok(tokio::fs::read(self.resolve(path)).await?)
    }

    async fn delete(&self, path: &str) -> CatalogResult<()> {
        match tokio::fs::remove_file(self.resolve(path)).await {
            Ok(()) => {
                debug!(path = %path, "removed blob");
                Ok(())
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
