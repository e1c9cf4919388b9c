//! Object storage - the upload seam for submission and profile images.
//!
//! The backend's object storage is reduced to the one call this application
//! makes: upload bytes into a bucket under a name and get a public URL
//! back. [`FsObjectStore`] is the concrete store, keeping buckets as
//! directories under a configured media root.

use crate::errors::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Content types accepted for uploaded images.
const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// The upload interface of the object-storage backend.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    /// Stores `bytes` as `bucket/filename` and returns a public URL for it.
    async fn upload(
        &self,
        bucket: &str,
        filename: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String>;
}

/// Filesystem-backed object store. Each bucket is a directory under the
/// media root; URLs use the `file://` scheme.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Creates a store rooted at the given media directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ObjectStore for FsObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        filename: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String> {
        if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
            return Err(Error::Validation {
                field: "content_type",
                message: format!("unsupported content type: {content_type}"),
            });
        }
        // Bucket and filename become path components verbatim; reject
        // anything that could escape the media root.
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.contains("..") {
            return Err(Error::Validation {
                field: "filename",
                message: "must be a bare file name".to_string(),
            });
        }

        let dir = self.root.join(bucket);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::Storage {
                message: format!("failed to create bucket {bucket}: {e}"),
            })?;

        let path = dir.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Error::Storage {
                message: format!("failed to write {bucket}/{filename}: {e}"),
            })?;

        debug!(bucket, filename, size = bytes.len(), "Stored object");
        Ok(format!("file://{}", path.display()))
    }
}
