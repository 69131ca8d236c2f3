//! Frontmatter codec for Verdant content records.
//!
//! Every content record carries its metadata as a delimiter-bounded
//! key/value block at the top of its `index.md` file:
//!
//! ```text
//! ---
//! title: "Morning Fog"
//! date: 2024-05-01T09:30:00.000Z
//! draft: false
//! tags:
//!   - garden
//!   - spring
//! ---
//! ```
//!
//! The codec is a text-level round-trip tool, not a full YAML parser. It
//! owns quoting and escaping policy: callers hand it typed [`Value`]s and
//! never pre-quote strings themselves.
//!
//! # Design Rules
//!
//! 1. Serialization preserves insertion order exactly.
//! 2. `parse(serialize(fm))` reproduces every key and its text value.
//! 3. Parsing is lenient: unrecognized lines are ignored, and a document
//!    with no delimiter-bounded block yields an empty mapping, not an
//!    error. Callers decide whether a missing required key is fatal.
//! 4. Type coercion (booleans, dates) is the caller's responsibility;
//!    parsed scalars come back as text.

pub mod codec;
pub mod value;

pub use codec::Frontmatter;
pub use value::Value;
