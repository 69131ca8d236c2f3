use std::path::{Path, PathBuf};

use crate::error::StoreResult;

/// Storage interface for content records.
///
/// Records are addressed by directory name (`{date}-{slug}`); only the
/// store knows where that directory lives on disk.
///
/// All implementations must satisfy these invariants:
/// - `create_record_dir` is idempotent and never disturbs files already
///   placed inside an existing directory.
/// - `place_image` moves the source file; on failure the source remains.
/// - `write_metadata` replaces the metadata file in full.
/// - `read_metadata` and `delete_record` report a missing record as
///   [`StoreError::NotFound`](crate::StoreError::NotFound), never as a
///   generic I/O failure.
pub trait RecordStore: Send + Sync {
    /// Create (or reuse) the directory for `dir_name` and return its path.
    fn create_record_dir(&self, dir_name: &str) -> StoreResult<PathBuf>;

    /// Move the temp upload into the record directory under its original
    /// filename and return the final path.
    fn place_image(
        &self,
        dir_name: &str,
        source_temp: &Path,
        original_filename: &str,
    ) -> StoreResult<PathBuf>;

    /// Overwrite the record's metadata file with `text`.
    fn write_metadata(&self, dir_name: &str, text: &str) -> StoreResult<()>;

    /// Read the record's metadata file.
    fn read_metadata(&self, dir_name: &str) -> StoreResult<String>;

    /// List record directory names. Hidden-prefixed entries are excluded;
    /// order is unspecified.
    fn list_record_dirs(&self) -> StoreResult<Vec<String>>;

    /// Remove the record directory and all its contents.
    fn delete_record(&self, dir_name: &str) -> StoreResult<()>;
}
