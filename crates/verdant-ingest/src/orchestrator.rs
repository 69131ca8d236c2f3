//! The ingestion pipeline and the record operations built around it.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use verdant_frontmatter::{Frontmatter, Value};
use verdant_media::{MediaHost, UploadReceipt};
use verdant_store::RecordStore;
use verdant_types::{ContentRecord, Identity};
use verdant_vcs::{Persister, PersistStatus};

use crate::config::IngestConfig;
use crate::error::{IngestError, IngestResult};
use crate::submission::{IngestOutcome, NewSubmission, UpdatePatch};

/// Sequences submissions through the store, media host, and persister.
///
/// All three collaborators are injected capabilities; the orchestrator
/// itself holds no ambient state beyond its configuration.
pub struct Ingestor {
    store: Arc<dyn RecordStore>,
    media: Arc<dyn MediaHost>,
    persister: Arc<dyn Persister>,
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(
        store: Arc<dyn RecordStore>,
        media: Arc<dyn MediaHost>,
        persister: Arc<dyn Persister>,
        config: IngestConfig,
    ) -> Self {
        Self {
            store,
            media,
            persister,
            config,
        }
    }

    /// Run the full pipeline for one submission.
    ///
    /// Validation and identity failures abort before any mutation. From
    /// directory creation onward, failures leave prior filesystem state in
    /// place and trigger a salvage snapshot before the error is returned.
    pub async fn ingest(
        &self,
        submission: NewSubmission,
        now: DateTime<Utc>,
    ) -> IngestResult<IngestOutcome> {
        if submission.title.trim().is_empty() {
            return Err(IngestError::Validation("title is required".into()));
        }
        if submission.image_alt.trim().is_empty() {
            return Err(IngestError::Validation("image alt text is required".into()));
        }

        let identity = Identity::derive(&submission.title, now)?;
        let dir_name = identity.dir_name();
        tracing::info!(record = %dir_name, "ingesting submission");

        match self.build_record(&identity, &dir_name, &submission).await {
            Ok((record_dir, receipt)) => {
                let persistence = self
                    .persister
                    .snapshot(&format!("Add post {dir_name}"))
                    .await;
                if persistence.is_failed() {
                    tracing::warn!(record = %dir_name, status = %persistence, "post created but not persisted");
                }
                Ok(IngestOutcome {
                    slug: dir_name,
                    record_dir,
                    media_path: receipt.public_id,
                    media_url: receipt.url,
                    persistence,
                })
            }
            Err(err) => {
                self.salvage(&dir_name).await;
                Err(err)
            }
        }
    }

    /// PlacingFile → UploadingMedia → WritingMetadata.
    async fn build_record(
        &self,
        identity: &Identity,
        dir_name: &str,
        submission: &NewSubmission,
    ) -> IngestResult<(PathBuf, UploadReceipt)> {
        let record_dir = self.store.create_record_dir(dir_name)?;
        let image_path = self.store.place_image(
            dir_name,
            &submission.temp_image,
            &submission.original_filename,
        )?;

        let target = format!("post/{dir_name}/{}", submission.original_filename);
        let receipt = self.media.upload(&image_path, &target).await?;

        let fm = self.compose_frontmatter(identity, submission, &receipt);
        self.store.write_metadata(dir_name, &fm.serialize())?;
        Ok((record_dir, receipt))
    }

    fn compose_frontmatter(
        &self,
        identity: &Identity,
        submission: &NewSubmission,
        receipt: &UploadReceipt,
    ) -> Frontmatter {
        let mut fm = Frontmatter::new();
        fm.set("title", Value::text(&submission.title));
        fm.set("date", Value::raw(identity.timestamp_text()));
        fm.set("draft", Value::Bool(false));
        fm.set("layout", Value::raw(&self.config.layout));
        fm.set("image", Value::raw(&receipt.public_id));
        fm.set("image_alt", Value::text(&submission.image_alt));
        if let Some(ratio) = trimmed(&submission.image_ratio) {
            fm.set("image_ratio", Value::text(ratio));
        }
        if let Some(url) = trimmed(&submission.video_url) {
            fm.set("video_url", Value::text(url));
        }
        let tags = clean_tags(&submission.tags);
        if !tags.is_empty() {
            fm.set("tags", Value::list(tags));
        }
        fm
    }

    /// Best-effort snapshot of whatever partial state a failed ingestion
    /// left behind. Its own failure is logged, never escalated.
    async fn salvage(&self, dir_name: &str) {
        let message = format!("Recover partial state for {dir_name}");
        let status = self.persister.snapshot(&message).await;
        if status.is_failed() {
            tracing::warn!(record = %dir_name, status = %status, "salvage snapshot failed");
        } else {
            tracing::info!(record = %dir_name, status = %status, "salvage snapshot taken");
        }
    }

    /// One summary per readable record, newest first.
    ///
    /// Records whose metadata is missing or unparsable are skipped with a
    /// warning rather than failing the whole listing.
    pub fn list(&self) -> IngestResult<Vec<ContentRecord>> {
        let mut records = Vec::new();
        for dir_name in self.store.list_record_dirs()? {
            let text = match self.store.read_metadata(&dir_name) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(record = %dir_name, error = %e, "skipping record without metadata");
                    continue;
                }
            };
            let fm = Frontmatter::parse(&text);
            match ContentRecord::from_frontmatter(&dir_name, &fm) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(record = %dir_name, error = %e, "skipping record with malformed metadata");
                }
            }
        }
        records.sort_by(|a, b| b.sort_timestamp().cmp(&a.sort_timestamp()));
        Ok(records)
    }

    /// Overlay the supplied fields onto an existing record's metadata.
    ///
    /// Works at the frontmatter-mapping level so keys the patch does not
    /// touch (including `layout` and `draft`) survive byte-for-byte.
    pub async fn update(&self, slug: &str, patch: UpdatePatch) -> IngestResult<PersistStatus> {
        let text = self.store.read_metadata(slug)?;
        let mut fm = Frontmatter::parse(&text);
        ContentRecord::from_frontmatter(slug, &fm).map_err(|source| {
            IngestError::MetadataCorrupt {
                slug: slug.to_string(),
                source,
            }
        })?;

        if let Some(title) = patch.title {
            fm.set("title", Value::text(title));
        }
        if let Some(alt) = patch.image_alt {
            fm.set("image_alt", Value::text(alt));
        }
        if let Some(tags) = patch.tags {
            let tags = clean_tags(&tags);
            if tags.is_empty() {
                fm.remove("tags");
            } else {
                fm.set("tags", Value::list(tags));
            }
        }
        overlay_optional(&mut fm, "image_ratio", patch.image_ratio);
        overlay_optional(&mut fm, "video_url", patch.video_url);

        self.store.write_metadata(slug, &fm.serialize())?;
        Ok(self.persister.snapshot(&format!("Update post {slug}")).await)
    }

    /// Remove a record and snapshot the removal.
    pub async fn delete(&self, slug: &str) -> IngestResult<PersistStatus> {
        self.store.delete_record(slug)?;
        Ok(self.persister.snapshot(&format!("Delete post {slug}")).await)
    }
}

/// Overlay one optional scalar: `None` leaves the key alone, an empty or
/// blank string removes it, anything else replaces it.
fn overlay_optional(fm: &mut Frontmatter, key: &str, supplied: Option<String>) {
    match supplied {
        None => {}
        Some(value) if value.trim().is_empty() => {
            fm.remove(key);
        }
        Some(value) => fm.set(key, Value::text(value)),
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::{tempdir, TempDir};
    use verdant_media::InMemoryMediaHost;
    use verdant_store::FsRecordStore;
    use verdant_vcs::RecordingPersister;

    struct Fixture {
        tmp: TempDir,
        ingestor: Ingestor,
        media: Arc<InMemoryMediaHost>,
        persister: Arc<RecordingPersister>,
        posts_root: PathBuf,
    }

    fn fixture() -> Fixture {
        let tmp = tempdir().unwrap();
        let posts_root = tmp.path().join("content").join("post");
        let media = Arc::new(InMemoryMediaHost::new());
        let persister = Arc::new(RecordingPersister::new());
        let ingestor = Ingestor::new(
            Arc::new(FsRecordStore::new(posts_root.clone())),
            media.clone(),
            persister.clone(),
            IngestConfig::default(),
        );
        Fixture {
            tmp,
            ingestor,
            media,
            persister,
            posts_root,
        }
    }

    fn may_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    fn submission(fx: &Fixture, title: &str) -> NewSubmission {
        let temp = fx.tmp.path().join(format!("upload-{}", title.len()));
        fs::write(&temp, b"image bytes").unwrap();
        NewSubmission {
            title: title.to_string(),
            image_alt: "A photo".to_string(),
            temp_image: temp,
            original_filename: "photo.jpg".to_string(),
            tags: vec!["spring".to_string(), " macro ".to_string(), "".to_string()],
            image_ratio: Some("4:5".to_string()),
            video_url: None,
        }
    }

    #[tokio::test]
    async fn full_pipeline_creates_the_record() {
        let fx = fixture();
        let sub = submission(&fx, "My First Post");
        let outcome = fx.ingestor.ingest(sub, may_first()).await.unwrap();

        assert_eq!(outcome.slug, "2024-05-01-my-first-post");
        assert_eq!(outcome.record_dir, fx.posts_root.join("2024-05-01-my-first-post"));
        assert_eq!(outcome.media_path, "post/2024-05-01-my-first-post/photo");
        assert_eq!(outcome.persistence, PersistStatus::Committed);

        // Image was moved in under its original name.
        assert!(outcome.record_dir.join("photo.jpg").exists());

        // Metadata parses back with the original title text.
        let text = fs::read_to_string(outcome.record_dir.join("index.md")).unwrap();
        let fm = Frontmatter::parse(&text);
        assert_eq!(fm.get("title"), Some(&Value::Text("My First Post".into())));
        assert_eq!(
            fm.get("date"),
            Some(&Value::Raw("2024-05-01T09:30:00.000Z".into()))
        );
        assert_eq!(fm.get("draft"), Some(&Value::Raw("false".into())));
        assert_eq!(fm.get("layout"), Some(&Value::Raw("lightbox".into())));
        assert_eq!(
            fm.get("tags").and_then(Value::as_list),
            Some(&["spring".to_string(), "macro".to_string()][..])
        );

        assert_eq!(fx.persister.messages(), vec!["Add post 2024-05-01-my-first-post"]);
        assert_eq!(fx.media.uploads().len(), 1);
    }

    #[tokio::test]
    async fn blank_required_fields_abort_before_any_mutation() {
        let fx = fixture();
        let mut sub = submission(&fx, "ok");
        sub.image_alt = "   ".to_string();
        let err = fx.ingestor.ingest(sub, may_first()).await.unwrap_err();
        assert!(matches!(err, IngestError::Validation(_)));
        assert!(!fx.posts_root.exists());
        assert!(fx.persister.messages().is_empty());
    }

    #[tokio::test]
    async fn unusable_title_aborts_before_any_mutation() {
        let fx = fixture();
        let sub = submission(&fx, "!!!");
        let err = fx.ingestor.ingest(sub, may_first()).await.unwrap_err();
        assert!(matches!(err, IngestError::InvalidInput(_)));
        assert!(!fx.posts_root.exists());
        assert!(fx.persister.messages().is_empty());
    }

    #[tokio::test]
    async fn upload_failure_leaves_moved_image_and_salvages() {
        let fx = fixture();
        fx.media.fail_with("quota exceeded");
        let sub = submission(&fx, "Doomed Post");
        let err = fx.ingestor.ingest(sub, may_first()).await.unwrap_err();
        assert!(matches!(err, IngestError::Media(_)));

        // The moved image is still in place, untracked rollback is not
        // attempted, and a salvage snapshot was taken.
        let dir = fx.posts_root.join("2024-05-01-doomed-post");
        assert!(dir.join("photo.jpg").exists());
        assert!(!dir.join("index.md").exists());
        assert_eq!(
            fx.persister.messages(),
            vec!["Recover partial state for 2024-05-01-doomed-post"]
        );
    }

    #[tokio::test]
    async fn salvage_failure_does_not_change_the_error() {
        let fx = fixture();
        fx.media.fail_with("quota exceeded");
        fx.persister
            .respond_with(PersistStatus::Failed("remote down".into()));
        let sub = submission(&fx, "Doomed Post");
        let err = fx.ingestor.ingest(sub, may_first()).await.unwrap_err();
        assert!(matches!(err, IngestError::Media(_)));
    }

    #[tokio::test]
    async fn persistence_failure_does_not_fail_the_ingestion() {
        let fx = fixture();
        fx.persister
            .respond_with(PersistStatus::Failed("push rejected".into()));
        let sub = submission(&fx, "My First Post");
        let outcome = fx.ingestor.ingest(sub, may_first()).await.unwrap();
        assert!(outcome.persistence.is_failed());
        assert!(outcome.record_dir.join("index.md").exists());
    }

    #[tokio::test]
    async fn listing_sorts_newest_first_and_skips_corrupt_records() {
        let fx = fixture();
        fx.ingestor
            .ingest(submission(&fx, "Older"), may_first())
            .await
            .unwrap();
        let june = Utc.with_ymd_and_hms(2024, 6, 10, 8, 0, 0).unwrap();
        fx.ingestor
            .ingest(submission(&fx, "Newer"), june)
            .await
            .unwrap();

        // A directory whose metadata has no frontmatter block is skipped.
        let corrupt = fx.posts_root.join("2024-07-01-corrupt");
        fs::create_dir_all(&corrupt).unwrap();
        fs::write(corrupt.join("index.md"), "not frontmatter").unwrap();
        // And so is one with no metadata file at all.
        fs::create_dir_all(fx.posts_root.join("2024-07-02-empty")).unwrap();

        let records = fx.ingestor.list().unwrap();
        let slugs: Vec<&str> = records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["2024-06-10-newer", "2024-05-01-older"]);
    }

    #[tokio::test]
    async fn update_overlays_only_supplied_fields() {
        let fx = fixture();
        let outcome = fx
            .ingestor
            .ingest(submission(&fx, "My First Post"), may_first())
            .await
            .unwrap();

        let status = fx
            .ingestor
            .update(
                &outcome.slug,
                UpdatePatch {
                    tags: Some(vec!["summer".to_string()]),
                    ..UpdatePatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(status, PersistStatus::Committed);

        let text = fs::read_to_string(outcome.record_dir.join("index.md")).unwrap();
        let fm = Frontmatter::parse(&text);
        assert_eq!(fm.get("title"), Some(&Value::Text("My First Post".into())));
        assert_eq!(fm.get("image_alt"), Some(&Value::Text("A photo".into())));
        assert_eq!(fm.get("layout"), Some(&Value::Raw("lightbox".into())));
        assert_eq!(fm.get("image_ratio"), Some(&Value::Text("4:5".into())));
        assert_eq!(
            fm.get("tags").and_then(Value::as_list),
            Some(&["summer".to_string()][..])
        );
        assert_eq!(
            fx.persister.messages().last().unwrap(),
            &format!("Update post {}", outcome.slug)
        );
    }

    #[tokio::test]
    async fn update_with_empty_values_removes_optional_keys() {
        let fx = fixture();
        let outcome = fx
            .ingestor
            .ingest(submission(&fx, "My First Post"), may_first())
            .await
            .unwrap();

        fx.ingestor
            .update(
                &outcome.slug,
                UpdatePatch {
                    image_ratio: Some(String::new()),
                    tags: Some(Vec::new()),
                    ..UpdatePatch::default()
                },
            )
            .await
            .unwrap();

        let text = fs::read_to_string(outcome.record_dir.join("index.md")).unwrap();
        let fm = Frontmatter::parse(&text);
        assert!(fm.get("image_ratio").is_none());
        assert!(fm.get("tags").is_none());
        assert_eq!(fm.get("title"), Some(&Value::Text("My First Post".into())));
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found() {
        let fx = fixture();
        let err = fx
            .ingestor
            .update("2024-05-01-nope", UpdatePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::NotFound(_)));
        assert!(fx.persister.messages().is_empty());
    }

    #[tokio::test]
    async fn update_of_malformed_metadata_is_rejected() {
        let fx = fixture();
        let dir = fx.posts_root.join("2024-05-01-broken");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.md"), "---\ntitle: \"t\"\n---\n\n").unwrap();

        let err = fx
            .ingestor
            .update("2024-05-01-broken", UpdatePatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::MetadataCorrupt { .. }));
        assert!(fx.persister.messages().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_and_snapshots() {
        let fx = fixture();
        let outcome = fx
            .ingestor
            .ingest(submission(&fx, "My First Post"), may_first())
            .await
            .unwrap();

        fx.ingestor.delete(&outcome.slug).await.unwrap();
        assert!(!outcome.record_dir.exists());
        assert_eq!(
            fx.persister.messages().last().unwrap(),
            &format!("Delete post {}", outcome.slug)
        );
    }

    #[tokio::test]
    async fn delete_of_missing_record_mutates_nothing() {
        let fx = fixture();
        fx.ingestor
            .ingest(submission(&fx, "Keeper"), may_first())
            .await
            .unwrap();
        let before = fx.persister.messages().len();

        let err = fx.ingestor.delete("2024-05-01-nope").await.unwrap_err();
        assert!(matches!(err, IngestError::NotFound(_)));
        assert_eq!(fx.persister.messages().len(), before);
        assert_eq!(fx.ingestor.list().unwrap().len(), 1);
    }
}
