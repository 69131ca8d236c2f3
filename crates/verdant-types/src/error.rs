use thiserror::Error;

/// Errors from identity derivation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The title contained no alphanumeric characters, so no slug body
    /// could be derived. Callers must reject the submission rather than
    /// substitute a placeholder.
    #[error("title {title:?} contains no alphanumeric characters")]
    EmptySlug { title: String },
}

/// Errors from interpreting a record's frontmatter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// A required frontmatter key is absent or not a scalar.
    #[error("missing required frontmatter field: {0}")]
    MissingField(&'static str),
}
