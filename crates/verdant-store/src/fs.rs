//! Filesystem-backed record store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;
use crate::METADATA_FILE;

/// Record store rooted at a posts directory on the local filesystem.
///
/// The root is created lazily on the first write. Reads against a missing
/// root behave like an empty store.
pub struct FsRecordStore {
    root: PathBuf,
}

impl FsRecordStore {
    /// Create a store rooted at `root` (typically `{content_dir}/post`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The posts root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, dir_name: &str) -> PathBuf {
        self.root.join(dir_name)
    }
}

impl RecordStore for FsRecordStore {
    fn create_record_dir(&self, dir_name: &str) -> StoreResult<PathBuf> {
        let path = self.record_path(dir_name);
        fs::create_dir_all(&path).map_err(|e| StoreError::io(path.display().to_string(), e))?;
        Ok(path)
    }

    fn place_image(
        &self,
        dir_name: &str,
        source_temp: &Path,
        original_filename: &str,
    ) -> StoreResult<PathBuf> {
        let dest = self.record_path(dir_name).join(original_filename);
        // A rename keeps the temp file intact when it fails, so the caller
        // can still clean it up.
        fs::rename(source_temp, &dest)
            .map_err(|e| StoreError::io(dest.display().to_string(), e))?;
        Ok(dest)
    }

    fn write_metadata(&self, dir_name: &str, text: &str) -> StoreResult<()> {
        let path = self.record_path(dir_name).join(METADATA_FILE);
        fs::write(&path, text).map_err(|e| StoreError::io(path.display().to_string(), e))
    }

    fn read_metadata(&self, dir_name: &str) -> StoreResult<String> {
        let path = self.record_path(dir_name).join(METADATA_FILE);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(dir_name.to_string()))
            }
            Err(e) => Err(StoreError::io(path.display().to_string(), e)),
        }
    }

    fn list_record_dirs(&self) -> StoreResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(self.root.display().to_string(), e)),
        };
        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(self.root.display().to_string(), e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let file_type = entry
                .file_type()
                .map_err(|e| StoreError::io(name.clone(), e))?;
            if file_type.is_dir() {
                dirs.push(name);
            }
        }
        Ok(dirs)
    }

    fn delete_record(&self, dir_name: &str) -> StoreResult<()> {
        let path = self.record_path(dir_name);
        if !path.is_dir() {
            return Err(StoreError::NotFound(dir_name.to_string()));
        }
        tracing::debug!(record = dir_name, "removing record directory");
        fs::remove_dir_all(&path).map_err(|e| StoreError::io(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(tmp: &tempfile::TempDir) -> FsRecordStore {
        FsRecordStore::new(tmp.path().join("post"))
    }

    #[test]
    fn create_is_idempotent_and_preserves_siblings() {
        let tmp = tempdir().unwrap();
        let store = store_in(&tmp);
        let dir = store.create_record_dir("2024-05-01-my-first-post").unwrap();
        fs::write(dir.join("photo.jpg"), b"bytes").unwrap();

        let again = store.create_record_dir("2024-05-01-my-first-post").unwrap();
        assert_eq!(dir, again);
        assert_eq!(fs::read(dir.join("photo.jpg")).unwrap(), b"bytes");
    }

    #[test]
    fn place_image_moves_the_temp_file() {
        let tmp = tempdir().unwrap();
        let store = store_in(&tmp);
        let dir = store.create_record_dir("2024-05-01-a").unwrap();
        let temp = tmp.path().join("upload-123");
        fs::write(&temp, b"image bytes").unwrap();

        let dest = store.place_image("2024-05-01-a", &temp, "photo.jpg").unwrap();
        assert_eq!(dest, dir.join("photo.jpg"));
        assert_eq!(fs::read(&dest).unwrap(), b"image bytes");
        assert!(!temp.exists());
    }

    #[test]
    fn failed_move_leaves_the_temp_file() {
        let tmp = tempdir().unwrap();
        let store = store_in(&tmp);
        let temp = tmp.path().join("upload-456");
        fs::write(&temp, b"image bytes").unwrap();

        // Destination directory was never created.
        let err = store
            .place_image("2024-05-01-missing", &temp, "photo.jpg")
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(temp.exists());
    }

    #[test]
    fn metadata_round_trip() {
        let tmp = tempdir().unwrap();
        let store = store_in(&tmp);
        store.create_record_dir("2024-05-01-a").unwrap();
        store
            .write_metadata("2024-05-01-a", "---\ntitle: \"a\"\n---\n\n")
            .unwrap();
        let text = store.read_metadata("2024-05-01-a").unwrap();
        assert!(text.contains("title: \"a\""));

        // Overwrite in full, no merge.
        store.write_metadata("2024-05-01-a", "replaced").unwrap();
        assert_eq!(store.read_metadata("2024-05-01-a").unwrap(), "replaced");
    }

    #[test]
    fn read_metadata_of_missing_record_is_not_found() {
        let tmp = tempdir().unwrap();
        let store = store_in(&tmp);
        assert!(matches!(
            store.read_metadata("2024-05-01-nope"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn listing_skips_hidden_entries_and_files() {
        let tmp = tempdir().unwrap();
        let store = store_in(&tmp);
        store.create_record_dir("2024-05-01-a").unwrap();
        store.create_record_dir("2024-06-10-b").unwrap();
        fs::create_dir(store.root().join(".obsidian")).unwrap();
        fs::write(store.root().join("_index.md"), b"").unwrap();

        let mut dirs = store.list_record_dirs().unwrap();
        dirs.sort();
        assert_eq!(dirs, vec!["2024-05-01-a", "2024-06-10-b"]);
    }

    #[test]
    fn listing_missing_root_is_empty() {
        let tmp = tempdir().unwrap();
        let store = store_in(&tmp);
        assert!(store.list_record_dirs().unwrap().is_empty());
    }

    #[test]
    fn delete_removes_recursively() {
        let tmp = tempdir().unwrap();
        let store = store_in(&tmp);
        let dir = store.create_record_dir("2024-05-01-a").unwrap();
        fs::write(dir.join("photo.jpg"), b"x").unwrap();
        fs::write(dir.join("index.md"), b"y").unwrap();
        fs::create_dir(dir.join("unexpected")).unwrap();

        store.delete_record("2024-05-01-a").unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn delete_of_missing_record_is_not_found() {
        let tmp = tempdir().unwrap();
        let store = store_in(&tmp);
        store.create_record_dir("2024-05-01-a").unwrap();
        assert!(matches!(
            store.delete_record("2024-05-01-b"),
            Err(StoreError::NotFound(_))
        ));
        // Nothing else was touched.
        assert_eq!(store.list_record_dirs().unwrap(), vec!["2024-05-01-a"]);
    }
}
