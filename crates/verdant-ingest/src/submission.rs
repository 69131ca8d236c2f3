//! Inbound and outbound shapes of the orchestrator.

use std::path::PathBuf;

use verdant_vcs::PersistStatus;

/// One submitted image plus its metadata fields.
#[derive(Clone, Debug)]
pub struct NewSubmission {
    pub title: String,
    pub image_alt: String,
    /// Where the uploaded file currently sits on local disk.
    pub temp_image: PathBuf,
    /// The filename the user uploaded, kept as the stored name.
    pub original_filename: String,
    pub tags: Vec<String>,
    pub image_ratio: Option<String>,
    pub video_url: Option<String>,
}

/// Fields a caller may overlay onto an existing record.
///
/// `None` means "leave unchanged". An empty string (or empty tag list)
/// removes the optional key.
#[derive(Clone, Debug, Default)]
pub struct UpdatePatch {
    pub title: Option<String>,
    pub image_alt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_ratio: Option<String>,
    pub video_url: Option<String>,
}

/// What a successful ingestion produced.
///
/// Persistence status rides along separately from the created-record
/// info: ingestion is complete once metadata is written, even when the
/// version-control step did not go through.
#[derive(Clone, Debug)]
pub struct IngestOutcome {
    /// The record's directory name, `{date}-{slug}`.
    pub slug: String,
    /// Where the record landed on disk.
    pub record_dir: PathBuf,
    /// The media host's stored path (public id).
    pub media_path: String,
    /// The media host's canonical URL.
    pub media_url: String,
    pub persistence: PersistStatus,
}
