//! The typed view of one content record's frontmatter.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use verdant_frontmatter::{Frontmatter, Value};

use crate::error::RecordError;

/// One persisted content record, as read back from its metadata file.
///
/// `slug` is the record's directory name and is not stored in the
/// frontmatter itself; it is injected by whoever read the file. The
/// remaining fields mirror the frontmatter keys. The `date` field stays
/// text — the codec is a text-level tool and unparsable dates must still
/// be listable (they sort as earliest, see [`ContentRecord::sort_timestamp`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub image: String,
    pub image_alt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ratio: Option<String>,
    pub draft: bool,
}

impl ContentRecord {
    /// Interpret a parsed frontmatter mapping as a content record.
    ///
    /// The four required keys must be present as scalars; everything else
    /// is optional. An empty tags list and an absent tags key are
    /// equivalent.
    pub fn from_frontmatter(slug: &str, fm: &Frontmatter) -> Result<Self, RecordError> {
        let scalar = |key: &'static str| -> Result<String, RecordError> {
            fm.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(RecordError::MissingField(key))
        };
        Ok(Self {
            slug: slug.to_string(),
            title: scalar("title")?,
            date: scalar("date")?,
            image: scalar("image")?,
            image_alt: scalar("image_alt")?,
            tags: fm
                .get("tags")
                .and_then(Value::as_list)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
            video_url: fm.get("video_url").and_then(Value::as_str).map(str::to_string),
            image_ratio: fm.get("image_ratio").and_then(Value::as_str).map(str::to_string),
            draft: fm.get("draft").and_then(Value::as_str) == Some("true"),
        })
    }

    /// The instant to sort this record by: the parsed `date` field, with
    /// unparsable dates treated as earliest.
    pub fn sort_timestamp(&self) -> DateTime<Utc> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date) {
            return dt.with_timezone(&Utc);
        }
        if let Ok(day) = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            if let Some(dt) = day.and_hms_opt(0, 0, 0) {
                return dt.and_utc();
            }
        }
        DateTime::<Utc>::MIN_UTC
    }
}
