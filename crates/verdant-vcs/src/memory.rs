//! Recording persister for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::status::PersistStatus;
use crate::traits::Persister;

/// Persister that records snapshot messages and returns a canned status.
pub struct RecordingPersister {
    messages: Mutex<Vec<String>>,
    status: Mutex<PersistStatus>,
}

impl RecordingPersister {
    /// Create a recorder that reports every snapshot as `Committed`.
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            status: Mutex::new(PersistStatus::Committed),
        }
    }

    /// Change the status returned by subsequent snapshots.
    pub fn respond_with(&self, status: PersistStatus) {
        *self.status.lock().expect("lock poisoned") = status;
    }

    /// Messages of all snapshots taken so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("lock poisoned").clone()
    }
}

impl Default for RecordingPersister {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Persister for RecordingPersister {
    async fn snapshot(&self, message: &str) -> PersistStatus {
        self.messages
            .lock()
            .expect("lock poisoned")
            .push(message.to_string());
        self.status.lock().expect("lock poisoned").clone()
    }
}
