//! HTTP surface for Verdant.
//!
//! Exposes the record API over axum:
//!
//! - `POST /api/upload-post` — multipart image + metadata submission
//! - `GET /api/posts` — all records, newest first
//! - `PUT /api/posts/:slug` — overlay metadata fields
//! - `DELETE /api/posts/:slug` — remove a record
//!
//! Handlers own nothing but request/response shaping; all sequencing and
//! failure policy lives in `verdant-ingest`.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::build_router;
pub use server::ApiServer;
pub use state::AppState;
