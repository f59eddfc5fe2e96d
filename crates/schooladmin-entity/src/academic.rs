//! Academic master data: classes and subjects.

use serde::{Deserialize, Serialize};

use schooladmin_core::traits::Resource;
use schooladmin_core::types::FormFields;

use crate::common::{num_text, opt_string_or_number};

/// A class (rombel) at a given grade level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassItem {
    /// Backend identifier.
    pub id: u64,
    /// Class name, e.g. `7A`.
    pub name: String,
    /// Grade level.
    #[serde(default)]
    pub level: Option<i64>,
    /// Maximum number of students.
    #[serde(default)]
    pub capacity: Option<i64>,
}

impl ClassItem {
    /// Empty form for creating a class.
    pub fn create_form() -> FormFields {
        FormFields::new()
            .with("name", "")
            .with("level", "")
            .with("capacity", "")
    }
}

impl Resource for ClassItem {
    const PATH: &'static str = "/classes";
    const COLLECTION_KEY: &'static str = "classes";
    const LABEL: &'static str = "Class";

    fn id(&self) -> u64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        FormFields::new()
            .with("name", self.name.clone())
            .with("level", num_text(self.level))
            .with("capacity", num_text(self.capacity))
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "level" => self.level.map(|l| l.to_string()),
            _ => None,
        }
    }
}

/// A taught subject (mata pelajaran).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Backend identifier.
    pub id: u64,
    /// Subject name.
    pub name: String,
    /// Short code, auto-assigned by the backend when left blank.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub code: String,
    /// Grade level the subject is taught at.
    #[serde(default)]
    pub level: Option<i64>,
}

impl Subject {
    /// Empty form for creating a subject.
    pub fn create_form() -> FormFields {
        FormFields::new()
            .with("name", "")
            .with("code", "")
            .with("level", "")
    }
}

impl Resource for Subject {
    const PATH: &'static str = "/subjects";
    const COLLECTION_KEY: &'static str = "subjects";
    const LABEL: &'static str = "Subject";

    fn id(&self) -> u64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        FormFields::new()
            .with("name", self.name.clone())
            .with("code", self.code.clone())
            .with("level", num_text(self.level))
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "level" => self.level.map(|l| l.to_string()),
            _ => None,
        }
    }
}
