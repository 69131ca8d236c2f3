//! Core types for Verdant content records.
//!
//! This crate provides the identity and data-model types shared by the
//! store, orchestrator, and HTTP layers:
//!
//! - [`Identity`] — slug + date + timestamp derived once from a title at
//!   ingestion time
//! - [`ContentRecord`] — the typed view of one record's frontmatter
//! - [`IdentityError`] / [`RecordError`] — user-correctable rejection and
//!   data-integrity failures

pub mod error;
pub mod identity;
pub mod record;

pub use error::{IdentityError, RecordError};
pub use identity::{slugify, Identity};
pub use record::ContentRecord;
