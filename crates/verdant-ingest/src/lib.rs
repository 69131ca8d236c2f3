//! Ingestion orchestrator.
//!
//! Sequences one submitted image plus metadata into a content record:
//!
//! ```text
//! Validating → DerivingIdentity → PlacingFile → UploadingMedia
//!            → WritingMetadata → Committing → Done
//! ```
//!
//! Three independent systems are mutated along the way — the local
//! filesystem, the remote media host, and version control — with no
//! compensating-transaction layer across them. Failures mid-pipeline
//! leave earlier mutations in place and trigger a salvage snapshot so the
//! partial state is visible in history instead of silently orphaned.
//!
//! The orchestrator also re-enters the store for listing, updating, and
//! deleting records; every mutation ends with a snapshot whose outcome is
//! reported but never escalated.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod submission;

pub use config::IngestConfig;
pub use error::{IngestError, IngestResult};
pub use orchestrator::Ingestor;
pub use submission::{IngestOutcome, NewSubmission, UpdatePatch};
