//! Snapshot outcome reporting.

use std::fmt;

/// Outcome of one snapshot attempt.
///
/// `Failed` carries a human-readable reason and is reported to the caller
/// as status text, never escalated to a request failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PersistStatus {
    /// The working tree had no pending changes; nothing was invoked.
    Clean,
    /// Changes were staged, committed, and pushed.
    Committed,
    /// Some step failed; the reason names the step.
    Failed(String),
}

impl PersistStatus {
    /// Returns `true` for `Failed`.
    pub fn is_failed(&self) -> bool {
        matches!(self, PersistStatus::Failed(_))
    }
}

impl fmt::Display for PersistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistStatus::Clean => write!(f, "no changes to commit"),
            PersistStatus::Committed => write!(f, "committed and pushed"),
            PersistStatus::Failed(reason) => write!(f, "persistence failed: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text() {
        assert_eq!(PersistStatus::Clean.to_string(), "no changes to commit");
        assert_eq!(PersistStatus::Committed.to_string(), "committed and pushed");
        assert_eq!(
            PersistStatus::Failed("push: rejected".into()).to_string(),
            "persistence failed: push: rejected"
        );
    }

    #[test]
    fn only_failed_is_failed() {
        assert!(!PersistStatus::Clean.is_failed());
        assert!(!PersistStatus::Committed.is_failed());
        assert!(PersistStatus::Failed("x".into()).is_failed());
    }
}
