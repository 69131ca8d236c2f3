//! Git-backed persister, shelling out to the `git` CLI.

use std::path::PathBuf;
use std::process::Output;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::status::PersistStatus;
use crate::traits::Persister;

/// Which working tree, remote, and branch snapshots go to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GitConfig {
    /// The content repository's working tree.
    pub workdir: PathBuf,
    pub remote: String,
    pub branch: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            remote: "origin".to_string(),
            branch: "main".to_string(),
        }
    }
}

/// Persister that drives a pre-configured local git working tree.
pub struct GitPersister {
    config: GitConfig,
}

impl GitPersister {
    pub fn new(config: GitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GitConfig {
        &self.config
    }

    async fn git(&self, args: &[&str]) -> Result<Output, String> {
        Command::new("git")
            .args(args)
            .current_dir(&self.config.workdir)
            .output()
            .await
            .map_err(|e| format!("git {}: {e}", args.join(" ")))
    }

    /// Run one git step, mapping a non-zero exit to its stderr.
    async fn step(&self, name: &str, args: &[&str]) -> Result<Output, String> {
        let output = self.git(args).await.map_err(|e| format!("{name}: {e}"))?;
        if output.status.success() {
            Ok(output)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(format!("{name}: {}", stderr.trim()))
        }
    }
}

#[async_trait]
impl Persister for GitPersister {
    async fn snapshot(&self, message: &str) -> PersistStatus {
        let status = match self.step("status", &["status", "--porcelain"]).await {
            Ok(output) => output,
            Err(reason) => {
                tracing::warn!(%reason, "git snapshot failed");
                return PersistStatus::Failed(reason);
            }
        };
        if status.stdout.is_empty() {
            tracing::debug!("working tree clean, skipping snapshot");
            return PersistStatus::Clean;
        }

        let steps: [(&str, Vec<&str>); 3] = [
            ("stage", vec!["add", "-A"]),
            ("commit", vec!["commit", "-m", message]),
            (
                "push",
                vec![
                    "push",
                    self.config.remote.as_str(),
                    self.config.branch.as_str(),
                ],
            ),
        ];
        for (name, args) in &steps {
            if let Err(reason) = self.step(name, args).await {
                tracing::warn!(%reason, "git snapshot failed");
                return PersistStatus::Failed(reason);
            }
        }
        tracing::info!(%message, "content tree committed and pushed");
        PersistStatus::Committed
    }
}
