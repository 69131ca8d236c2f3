//! On-disk content record store.
//!
//! A record is one directory under the posts root, named
//! `{YYYY-MM-DD}-{slug}`, holding the original image file and an
//! `index.md` metadata file. This crate owns that layout and nothing
//! else — metadata is opaque text here, and remote media/version-control
//! state belong to their own crates.
//!
//! # Design Rules
//!
//! 1. Directory creation is idempotent: same-day identity collisions are
//!    possible and must not fail the pipeline.
//! 2. Images are moved, never copied; a failed move leaves the source
//!    available for cleanup.
//! 3. Metadata writes are full overwrites, never merges.
//! 4. Listing excludes hidden-prefixed entries and promises no order.

pub mod error;
pub mod fs;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsRecordStore;
pub use traits::RecordStore;

/// The metadata file name inside every record directory.
pub const METADATA_FILE: &str = "index.md";
