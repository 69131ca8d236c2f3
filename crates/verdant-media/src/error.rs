use thiserror::Error;

/// Errors from media host operations.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The upload tool could not be spawned at all.
    #[error("failed to run {tool}: {source}")]
    Tool {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The host (or its CLI) rejected the upload.
    #[error("upload of {public_id} failed: {reason}")]
    Rejected { public_id: String, reason: String },

    /// The host accepted the upload but returned no canonical URL.
    #[error("upload of {public_id} returned no canonical url")]
    MissingUrl { public_id: String },
}

/// Result alias for media operations.
pub type MediaResult<T> = Result<T, MediaError>;
