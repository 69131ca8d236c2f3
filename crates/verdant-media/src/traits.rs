use std::path::Path;

use async_trait::async_trait;

use crate::error::MediaResult;

/// The host's answer to a successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadReceipt {
    /// The stored path (public id) on the host, extension-free.
    pub public_id: String,
    /// The canonical URL the host serves the media from.
    pub url: String,
}

/// A remote media host.
///
/// `target` is the desired storage path relative to the host's configured
/// namespace, e.g. `post/2024-05-01-my-first-post/photo`. Implementations
/// must strip a trailing file extension from the final segment themselves
/// and must request overwrite/invalidate semantics, so the same target
/// always maps to the same stored object.
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, local_path: &Path, target: &str) -> MediaResult<UploadReceipt>;
}
