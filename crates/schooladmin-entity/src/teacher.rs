//! Teacher entity model.

use serde::{Deserialize, Serialize};

use schooladmin_core::traits::Resource;
use schooladmin_core::types::FormFields;

use crate::common::opt_string_or_number;

/// A teaching staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Backend identifier.
    pub id: u64,
    /// Staff number. Set on create, read-only afterwards.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub nip: String,
    /// Full name.
    pub name: String,
    /// Subject the teacher specializes in.
    #[serde(default)]
    pub subject_specialization: Option<String>,
}

impl Teacher {
    /// Empty form for registering a new teacher.
    pub fn create_form() -> FormFields {
        FormFields::new()
            .with("nip", "")
            .with("name", "")
            .with("subjectSpecialization", "")
    }
}

impl Resource for Teacher {
    const PATH: &'static str = "/teachers";
    const COLLECTION_KEY: &'static str = "teachers";
    const LABEL: &'static str = "Teacher";

    fn id(&self) -> u64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        FormFields::new().with("name", self.name.clone()).with(
            "subjectSpecialization",
            self.subject_specialization.clone().unwrap_or_default(),
        )
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "specialization" => self.subject_specialization.clone(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nip_is_not_editable() {
        let t: Teacher = serde_json::from_value(json!({
            "id": 3,
            "nip": "19870101",
            "name": "Bu Rina",
            "subjectSpecialization": "Matematika"
        }))
        .unwrap();
        let fields = t.form_fields();
        assert!(fields.get("nip").is_none());
        assert_eq!(fields.text("subjectSpecialization"), Some("Matematika"));
        assert_eq!(Teacher::create_form().len(), 3);
    }
}
