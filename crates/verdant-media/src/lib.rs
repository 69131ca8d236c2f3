//! Remote media host client.
//!
//! Uploads record images to the configured media host under a
//! deterministic path so that re-ingesting the same record replaces prior
//! content instead of versioning it.
//!
//! # Design Rules
//!
//! 1. Target paths never carry a file extension; the uploader strips one
//!    itself rather than trusting callers (double-extension prevention).
//! 2. Uploads always request overwrite-if-exists and cache invalidation.
//! 3. No internal retries — retry policy belongs to the caller.
//! 4. Remote state has no local rollback; orphaned uploads after a failed
//!    ingestion are an accepted limitation.

pub mod cloudinary;
pub mod error;
pub mod memory;
pub mod traits;

pub use cloudinary::{strip_extension, CloudinaryConfig, CloudinaryHost};
pub use error::{MediaError, MediaResult};
pub use memory::InMemoryMediaHost;
pub use traits::{MediaHost, UploadReceipt};
