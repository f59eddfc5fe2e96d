//! Shared value objects and serde helpers.

use serde::{Deserialize, Deserializer, Serialize};

/// A denormalized join supplied by the backend, e.g. a student's `Class`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    /// Display name of the referenced record.
    pub name: String,
    /// Secondary identifier some joins carry (a student's NIS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nis: Option<String>,
}

impl NamedRef {
    /// Create a reference with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nis: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl RawScalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
        }
    }
}

/// Accept either a JSON string or a JSON number and keep it as text.
///
/// Decimal columns (`amount`) and GraphQL `ID`s arrive in either form
/// depending on the endpoint.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawScalar::deserialize(deserializer)?.into_text())
}

/// Like [`string_or_number`], but `null` becomes an empty string.
/// Pair with `#[serde(default)]` to also accept absence.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawScalar>::deserialize(deserializer)?
        .map(RawScalar::into_text)
        .unwrap_or_default())
}

/// Render an optional number as form text.
pub(crate) fn num_text(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
