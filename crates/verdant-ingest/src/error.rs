use thiserror::Error;
use verdant_media::MediaError;
use verdant_store::StoreError;
use verdant_types::{IdentityError, RecordError};

/// Errors from ingestion, listing, update, and delete.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A required submission field is missing or blank.
    #[error("{0}")]
    Validation(String),

    /// The title yields no usable identity.
    #[error(transparent)]
    InvalidInput(#[from] IdentityError),

    /// The named record does not exist.
    #[error("post not found: {0}")]
    NotFound(String),

    /// An existing record's metadata is missing required keys.
    #[error("malformed metadata for {slug}: {source}")]
    MetadataCorrupt {
        slug: String,
        #[source]
        source: RecordError,
    },

    /// The media host rejected the upload.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Unexpected filesystem failure.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for IngestError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(slug) => IngestError::NotFound(slug),
            other => IngestError::Store(other),
        }
    }
}

/// Result alias for orchestrator operations.
pub type IngestResult<T> = Result<T, IngestError>;
