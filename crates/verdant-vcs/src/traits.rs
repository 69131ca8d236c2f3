use async_trait::async_trait;

use crate::status::PersistStatus;

/// Capability for snapshotting the content tree into version control.
///
/// Infallible by contract: implementations report every failure inside
/// [`PersistStatus::Failed`] instead of returning `Err`, because
/// persistence failure is non-fatal to the operations that trigger it.
#[async_trait]
pub trait Persister: Send + Sync {
    /// Detect pending changes and, if any exist, stage, commit with
    /// `message`, and push.
    async fn snapshot(&self, message: &str) -> PersistStatus;
}
