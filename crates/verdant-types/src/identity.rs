//! Content identity derivation.
//!
//! A record's identity is fixed at ingestion time: the title is reduced to
//! a URL-safe slug body and combined with the calendar date into the
//! directory name `{YYYY-MM-DD}-{slug}`. Derivation is pure and
//! deterministic given the title and the current instant.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::error::IdentityError;

/// The identity of one content record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// URL-safe slug body derived from the title.
    pub slug: String,
    /// Calendar date component of the creation instant.
    pub date: NaiveDate,
    /// Full creation instant.
    pub timestamp: DateTime<Utc>,
}

impl Identity {
    /// Derive an identity from a free-text title and the current instant.
    ///
    /// Fails if the title yields an empty slug body; callers treat this as
    /// a rejection of the submission.
    pub fn derive(title: &str, now: DateTime<Utc>) -> Result<Self, IdentityError> {
        let slug = slugify(title);
        if slug.is_empty() {
            return Err(IdentityError::EmptySlug {
                title: title.to_string(),
            });
        }
        Ok(Self {
            slug,
            date: now.date_naive(),
            timestamp: now,
        })
    }

    /// The record directory name, `{date}-{slug}`.
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.date.format("%Y-%m-%d"), self.slug)
    }

    /// The creation instant in round-trippable RFC 3339 text,
    /// millisecond precision, `Z` suffix.
    pub fn timestamp_text(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Reduce a title to a slug body: lowercase, every maximal run of
/// non-alphanumeric characters becomes a single hyphen, leading and
/// trailing hyphens trimmed.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for ch in title.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
