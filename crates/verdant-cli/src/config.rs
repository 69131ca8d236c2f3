//! Aggregated configuration, loaded from `verdant.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use verdant_ingest::IngestConfig;
use verdant_media::CloudinaryConfig;
use verdant_server::ServerConfig;
use verdant_vcs::GitConfig;

/// Everything the binary needs to wire the pipeline together.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the version-controlled content tree.
    pub content_dir: PathBuf,
    pub server: ServerConfig,
    pub ingest: IngestConfig,
    pub git: GitConfig,
    pub cloudinary: CloudinaryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            server: ServerConfig::default(),
            ingest: IngestConfig::default(),
            git: GitConfig::default(),
            cloudinary: CloudinaryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or from `verdant.toml` when no path
    /// is given. A missing default file falls back to defaults; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| Path::new("verdant.toml"));
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let config = toml::from_str(&text)
                    .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!("cannot read config {}: {e}", path.display())),
        }
    }

    /// Where record directories live.
    pub fn posts_root(&self) -> PathBuf {
        self.content_dir.join("post")
    }
}
