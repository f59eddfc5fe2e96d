//! Student entity model.

use serde::{Deserialize, Serialize};

use schooladmin_core::traits::Resource;
use schooladmin_core::types::FormFields;

use crate::common::{NamedRef, opt_string_or_number};

/// An enrolled student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Backend identifier.
    pub id: u64,
    /// Student number, assigned by the backend on create.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub nis: String,
    /// Full name.
    pub name: String,
    /// Date of birth (`YYYY-MM-DD`).
    #[serde(default)]
    pub dob: Option<String>,
    /// Parent or guardian name.
    #[serde(default)]
    pub parent_name: Option<String>,
    /// Parent phone number.
    #[serde(default)]
    pub parent_contact: Option<String>,
    /// Parent email address.
    #[serde(default)]
    pub parent_email: Option<String>,
    /// Home address.
    #[serde(default)]
    pub address: Option<String>,
    /// Whether the student's login account is active.
    #[serde(default)]
    pub is_active: bool,
    /// Whether the student is enrolled in school catering.
    #[serde(default)]
    pub is_catering: bool,
    /// Current class, if placed.
    #[serde(default, rename = "Class")]
    pub class: Option<NamedRef>,
}

impl Student {
    /// Class name for display, if the student has been placed.
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_ref().map(|c| c.name.as_str())
    }

    /// Empty form for registering a new student.
    pub fn create_form() -> FormFields {
        FormFields::new()
            .with("name", "")
            .with("dob", "")
            .with("parentName", "")
            .with("parentContact", "")
            .with("parentEmail", "")
            .with("address", "")
            .with("isCatering", false)
    }
}

impl Resource for Student {
    const PATH: &'static str = "/students";
    const COLLECTION_KEY: &'static str = "students";
    const LABEL: &'static str = "Student";

    fn id(&self) -> u64 {
        self.id
    }

    // NIS and date of birth are fixed after registration.
    fn form_fields(&self) -> FormFields {
        FormFields::new()
            .with("name", self.name.clone())
            .with("parentName", self.parent_name.clone().unwrap_or_default())
            .with("parentContact", self.parent_contact.clone().unwrap_or_default())
            .with("parentEmail", self.parent_email.clone().unwrap_or_default())
            .with("address", self.address.clone().unwrap_or_default())
            .with("isCatering", self.is_catering)
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "class" => self.class_name().map(str::to_string),
            "status" => Some(if self.is_active { "active" } else { "inactive" }.to_string()),
            _ => None,
        }
    }
}
