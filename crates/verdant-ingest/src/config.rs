use serde::{Deserialize, Serialize};

/// Orchestrator configuration.
///
/// The media namespace and git remote/branch live with their own
/// components ([`verdant_media::CloudinaryConfig`], [`verdant_vcs::GitConfig`]);
/// this struct carries only what the pipeline itself writes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestConfig {
    /// The `layout` frontmatter value stamped on new records.
    pub layout: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            layout: "lightbox".to_string(),
        }
    }
}
