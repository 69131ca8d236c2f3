//! Cloudinary-backed media host.
//!
//! Shells out to the `cld` CLI, which carries its own credential handling,
//! rather than reimplementing the signed-upload protocol.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};
use crate::traits::{MediaHost, UploadReceipt};

/// Cloudinary upload configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    /// Fixed top-level folder all records are stored under.
    pub namespace: String,
    /// The uploader binary to invoke.
    pub binary: String,
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            namespace: "verdant-garden".to_string(),
            binary: "cld".to_string(),
        }
    }
}

/// Media host backed by the Cloudinary CLI.
pub struct CloudinaryHost {
    config: CloudinaryConfig,
}

impl CloudinaryHost {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self { config }
    }

    /// The full public id for a namespace-relative target.
    fn public_id(&self, target: &str) -> String {
        let stripped = strip_extension(target);
        if self.config.namespace.is_empty() {
            stripped.to_string()
        } else {
            format!("{}/{}", self.config.namespace, stripped)
        }
    }
}

#[async_trait]
impl MediaHost for CloudinaryHost {
    async fn upload(&self, local_path: &Path, target: &str) -> MediaResult<UploadReceipt> {
        let public_id = self.public_id(target);
        tracing::info!(%public_id, "uploading to cloudinary");

        let output = Command::new(&self.config.binary)
            .arg("uploader")
            .arg("upload")
            .arg(local_path)
            .arg(format!("public_id={public_id}"))
            .arg("use_filename=false")
            .arg("unique_filename=false")
            .arg("overwrite=true")
            .arg("invalidate=true")
            .output()
            .await
            .map_err(|e| MediaError::Tool {
                tool: self.config.binary.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::Rejected {
                public_id,
                reason: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let url = canonical_url(&stdout).ok_or(MediaError::MissingUrl {
            public_id: public_id.clone(),
        })?;
        Ok(UploadReceipt { public_id, url })
    }
}

/// Strip a trailing file extension from the final path segment.
pub fn strip_extension(target: &str) -> &str {
    let seg_start = target.rfind('/').map_or(0, |i| i + 1);
    match target[seg_start..].rfind('.') {
        Some(dot) if dot > 0 => &target[..seg_start + dot],
        _ => target,
    }
}

/// Pull the canonical URL out of the CLI's JSON response.
///
/// The CLI may print log lines before the response object, so scan forward
/// to the first `{`.
fn canonical_url(stdout: &str) -> Option<String> {
    let start = stdout.find('{')?;
    let value: serde_json::Value = serde_json::from_str(stdout[start..].trim()).ok()?;
    value
        .get("secure_url")
        .or_else(|| value.get("url"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_trailing_extension() {
        assert_eq!(
            strip_extension("post/2024-05-01-a/photo.jpg"),
            "post/2024-05-01-a/photo"
        );
        assert_eq!(strip_extension("photo.png"), "photo");
        assert_eq!(strip_extension("post/2024-05-01-a/photo"), "post/2024-05-01-a/photo");
    }

    #[test]
    fn dotfiles_and_dotted_dirs_are_left_alone() {
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("a.b/photo"), "a.b/photo");
    }

    #[test]
    fn public_id_prefixes_namespace_and_strips_extension() {
        let host = CloudinaryHost::new(CloudinaryConfig {
            namespace: "garden".into(),
            binary: "cld".into(),
        });
        assert_eq!(
            host.public_id("post/2024-05-01-a/photo.jpg"),
            "garden/post/2024-05-01-a/photo"
        );
    }

    #[test]
    fn canonical_url_skips_log_lines() {
        let stdout = "Uploading...\n{\"public_id\": \"x\", \"secure_url\": \"https://res.example/x\"}";
        assert_eq!(
            canonical_url(stdout).as_deref(),
            Some("https://res.example/x")
        );
    }

    #[test]
    fn canonical_url_falls_back_to_plain_url() {
        let stdout = "{\"url\": \"http://res.example/x\"}";
        assert_eq!(canonical_url(stdout).as_deref(), Some("http://res.example/x"));
    }

    #[test]
    fn canonical_url_absent_is_none() {
        assert_eq!(canonical_url("{\"public_id\": \"x\"}"), None);
        assert_eq!(canonical_url("not json"), None);
    }
}
