//! In-memory media host for tests and embedding.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::cloudinary::strip_extension;
use crate::error::{MediaError, MediaResult};
use crate::traits::{MediaHost, UploadReceipt};

/// A recorded upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedUpload {
    pub public_id: String,
    pub local_path: PathBuf,
}

/// Media host that records uploads in memory.
///
/// Can be armed to reject every upload, for exercising the orchestrator's
/// failure path.
#[derive(Default)]
pub struct InMemoryMediaHost {
    uploads: Mutex<Vec<RecordedUpload>>,
    failure: Mutex<Option<String>>,
}

impl InMemoryMediaHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upload fail with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock().expect("lock poisoned") = Some(reason.into());
    }

    /// All uploads accepted so far.
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl MediaHost for InMemoryMediaHost {
    async fn upload(&self, local_path: &Path, target: &str) -> MediaResult<UploadReceipt> {
        let public_id = strip_extension(target).to_string();
        if let Some(reason) = self.failure.lock().expect("lock poisoned").clone() {
            return Err(MediaError::Rejected { public_id, reason });
        }
        self.uploads.lock().expect("lock poisoned").push(RecordedUpload {
            public_id: public_id.clone(),
            local_path: local_path.to_path_buf(),
        });
        let url = format!("https://media.test/{public_id}");
        Ok(UploadReceipt { public_id, url })
    }
}
