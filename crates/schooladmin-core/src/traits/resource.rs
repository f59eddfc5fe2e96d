//! Trait implemented by every entity a list controller can manage.

use serde::de::DeserializeOwned;

use crate::types::form::FormFields;

/// A backend collection entity.
///
/// Entities are plain records: identity is the numeric `id`, everything
/// else is data. Relations are denormalized joins supplied by the backend
/// and are never sent back on submit.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + std::fmt::Debug + 'static {
    /// Collection endpoint relative to the API base, e.g. `/students`.
    const PATH: &'static str;

    /// Envelope key the backend may wrap the collection in, e.g. `students`.
    const COLLECTION_KEY: &'static str;

    /// Singular human label used in notices.
    const LABEL: &'static str;

    /// Backend identifier.
    fn id(&self) -> u64;

    /// Current values as raw form input, used to pre-populate edit forms.
    fn form_fields(&self) -> FormFields;

    /// Value compared by client-side filters for `key`.
    ///
    /// Returns `None` for keys the entity does not expose, which makes the
    /// row fail any filter on that key.
    fn filter_value(&self, _key: &str) -> Option<String> {
        None
    }
}
