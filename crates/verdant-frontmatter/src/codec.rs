//! Serialization and parsing of the delimiter-bounded metadata block.

use crate::value::Value;

/// The line that opens and closes a frontmatter block.
const DELIMITER: &str = "---";

/// An insertion-ordered mapping of frontmatter keys to values.
///
/// Keys keep the position they were first inserted at; [`Frontmatter::set`]
/// on an existing key replaces the value in place. This keeps rewritten
/// metadata files diffing cleanly against their previous revision.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frontmatter {
    fields: Vec<(String, Value)>,
}

impl Frontmatter {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Insert or replace a field. Existing keys keep their position.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Remove a field, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(idx).1)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render the block: opening delimiter, one line per scalar field,
    /// indented `- item` lines for lists, closing delimiter, blank line.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        out.push_str(DELIMITER);
        out.push('\n');
        for (key, value) in &self.fields {
            match value {
                Value::Text(s) => {
                    out.push_str(key);
                    out.push_str(": \"");
                    out.push_str(&escape(s));
                    out.push_str("\"\n");
                }
                Value::Bool(b) => {
                    out.push_str(key);
                    out.push_str(": ");
                    out.push_str(if *b { "true" } else { "false" });
                    out.push('\n');
                }
                Value::Raw(s) => {
                    out.push_str(key);
                    out.push_str(": ");
                    out.push_str(s);
                    out.push('\n');
                }
                Value::List(items) => {
                    out.push_str(key);
                    out.push_str(":\n");
                    for item in items {
                        out.push_str("  - ");
                        out.push_str(item);
                        out.push('\n');
                    }
                }
            }
        }
        out.push_str(DELIMITER);
        out.push_str("\n\n");
        out
    }

    /// Parse the first delimiter-bounded block out of `text`.
    ///
    /// Quoted scalars come back as [`Value::Text`] with the surrounding
    /// quotes stripped, unquoted scalars as [`Value::Raw`]. A `key:` line
    /// with no value opens a list; subsequent `- item` lines attach to the
    /// most recently opened list. Unrecognized lines are skipped.
    ///
    /// A document with no delimiter-bounded block yields an empty mapping.
    pub fn parse(text: &str) -> Frontmatter {
        let lines: Vec<&str> = text.lines().collect();
        let Some(open) = lines.iter().position(|l| l.trim_end() == DELIMITER) else {
            return Frontmatter::new();
        };
        let Some(close_rel) = lines[open + 1..]
            .iter()
            .position(|l| l.trim_end() == DELIMITER)
        else {
            return Frontmatter::new();
        };

        let mut fm = Frontmatter::new();
        let mut open_list: Option<String> = None;

        for line in &lines[open + 1..open + 1 + close_rel] {
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(item) = trimmed.trim_start().strip_prefix("- ") {
                if let Some(key) = &open_list {
                    if let Some(Value::List(items)) = fm
                        .fields
                        .iter_mut()
                        .find(|(k, _)| k == key)
                        .map(|(_, v)| v)
                    {
                        items.push(item.trim().to_string());
                    }
                }
                continue;
            }
            // Indented continuation lines that are not list items are
            // unrecognized input.
            if trimmed.starts_with(char::is_whitespace) {
                continue;
            }
            let Some((key, rest)) = trimmed.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            let rest = rest.trim();
            if rest.is_empty() {
                fm.set(key, Value::List(Vec::new()));
                open_list = Some(key.to_string());
            } else {
                fm.set(key, parse_scalar(rest));
            }
        }
        fm
    }
}

/// Escape `\` and `"` inside a quoted string.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

/// Reverse [`escape`] for a double-quoted scalar.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Strip one matching pair of surrounding quotes, if present.
fn parse_scalar(raw: &str) -> Value {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Value::Text(unescape(&raw[1..raw.len() - 1]));
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return Value::Text(raw[1..raw.len() - 1].to_string());
    }
    Value::Raw(raw.to_string())
}
