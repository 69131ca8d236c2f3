//! Typed frontmatter values.

/// A single frontmatter field value.
///
/// The variant decides how the value is rendered: `Text` is emitted
/// double-quoted with escaping, `Raw` is emitted verbatim (timestamps and
/// bare words), `Bool` as `true`/`false`, and `List` as one indented
/// `- item` line per element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Free text, quoted on output.
    Text(String),
    /// A boolean flag.
    Bool(bool),
    /// A value emitted without quoting (e.g. an RFC 3339 timestamp or a
    /// media path). Parsed unquoted scalars come back as `Raw`.
    Raw(String),
    /// An ordered sequence of short strings.
    List(Vec<String>),
}

impl Value {
    /// Construct a quoted text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Construct an unquoted raw value.
    pub fn raw(s: impl Into<String>) -> Self {
        Value::Raw(s.into())
    }

    /// Construct a list value.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// The scalar text of this value, if it has one.
    ///
    /// `Text` and `Raw` return their contents; `Bool` and `List` return
    /// `None` (booleans round-trip through [`Value::Raw`] on parse).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Raw(s) => Some(s),
            Value::Bool(_) | Value::List(_) => None,
        }
    }

    /// The list items of this value, if it is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
