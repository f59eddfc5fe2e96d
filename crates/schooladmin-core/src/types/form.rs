//! Raw form input as edited by the user.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single form input value.
///
/// Text inputs keep the user's raw string, including numeric fields, so
/// that a failed submit can hand back exactly what was typed. Checkbox
/// fields stay boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text or numeric input.
    Text(String),
    /// Checkbox input.
    Flag(bool),
}

impl FieldValue {
    /// Return the text value, if this is a text input.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }

    /// Return the flag value, if this is a checkbox input.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Text(_) => None,
        }
    }

    /// Parse raw input as the same kind of value as `self`.
    ///
    /// A checkbox accepts `true`/`false`; any other input, and any input
    /// for a text field, stays text exactly as typed.
    pub fn parse_like(&self, raw: &str) -> Self {
        match (self, raw) {
            (Self::Flag(_), "true") => Self::Flag(true),
            (Self::Flag(_), "false") => Self::Flag(false),
            _ => Self::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Ordered field name to value map, sent as a flat JSON object on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, FieldValue>);

impl FormFields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a field.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    /// Set a field from raw input, keeping the kind of the value already
    /// there. Fields not yet present are text.
    pub fn set_raw(&mut self, name: &str, raw: &str) {
        let value = match self.get(name) {
            Some(existing) => existing.parse_like(raw),
            None => FieldValue::Text(raw.to_string()),
        };
        self.set(name, value);
    }

    /// Look up a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text value of a field, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no fields are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize to the flat JSON body the backend expects.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
