//! Response envelope normalization.
//!
//! The backend wraps collections inconsistently: sometimes under the
//! resource name (`{"students": [...]}`), sometimes under `data`, sometimes
//! as a bare array. An [`ItemExtractor`] tries an ordered list of
//! strategies and fails closed to an empty collection.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use schooladmin_core::traits::Resource;

/// One way of locating the collection array inside a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractStrategy {
    /// `body[key]` is the array.
    NamedKey(String),
    /// `body.data` is the array.
    DataKey,
    /// The body itself is the array.
    BareArray,
}

impl ExtractStrategy {
    fn locate<'a>(&self, body: &'a Value) -> Option<&'a Vec<Value>> {
        match self {
            Self::NamedKey(key) => body.get(key.as_str()).and_then(Value::as_array),
            Self::DataKey => body.get("data").and_then(Value::as_array),
            Self::BareArray => body.as_array(),
        }
    }
}

impl fmt::Display for ExtractStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedKey(key) => write!(f, "key '{key}'"),
            Self::DataKey => write!(f, "key 'data'"),
            Self::BareArray => write!(f, "bare array"),
        }
    }
}

/// Priority-ordered collection extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemExtractor {
    strategies: Vec<ExtractStrategy>,
}

impl ItemExtractor {
    /// Create an extractor from an explicit strategy list.
    pub fn new(strategies: Vec<ExtractStrategy>) -> Self {
        Self { strategies }
    }

    /// The default order: named key, then `data`, then bare array.
    pub fn for_key(key: &str) -> Self {
        Self::new(vec![
            ExtractStrategy::NamedKey(key.to_string()),
            ExtractStrategy::DataKey,
            ExtractStrategy::BareArray,
        ])
    }

    /// Default extractor for a resource's collection key.
    pub fn for_resource<T: Resource>() -> Self {
        Self::for_key(T::COLLECTION_KEY)
    }

    /// Strategies in the order they are tried.
    pub fn strategies(&self) -> &[ExtractStrategy] {
        &self.strategies
    }

    /// Pull the collection out of `body`.
    ///
    /// Never fails: an unrecognized body yields an empty vector, and
    /// entries that do not deserialize as `T` are skipped. Both cases are
    /// logged.
    pub fn extract<T: DeserializeOwned>(&self, body: &Value) -> Vec<T> {
        let found = self
            .strategies
            .iter()
            .enumerate()
            .find_map(|(index, strategy)| strategy.locate(body).map(|raw| (index, raw)));

        let Some((index, raw)) = found else {
            warn!(
                strategies = ?self.strategies,
                "No collection found in response, treating as empty"
            );
            return Vec::new();
        };

        if index > 0 {
            info!(strategy = %self.strategies[index], "Collection found via fallback strategy");
        }

        let mut items = Vec::with_capacity(raw.len());
        for (position, value) in raw.iter().enumerate() {
            match serde_json::from_value::<T>(value.clone()) {
                Ok(item) => items.push(item),
                Err(e) => warn!(position, error = %e, "Skipping malformed collection entry"),
            }
        }
        items
    }
}

/// Pagination metadata read from a list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// `totalPages`, when the server sent one.
    pub total_pages: Option<u64>,
    /// `totalItems`, when the server sent one.
    pub total_items: Option<u64>,
}

impl PageMeta {
    /// Read `totalPages` and `totalItems` from a response body.
    pub fn from_body(body: &Value) -> Self {
        Self {
            total_pages: read_count(body, "totalPages"),
            total_items: read_count(body, "totalItems"),
        }
    }
}

fn read_count(body: &Value, key: &str) -> Option<u64> {
    match body.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
