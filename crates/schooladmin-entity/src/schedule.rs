//! Lesson schedule entity model.

use serde::{Deserialize, Serialize};

use schooladmin_core::traits::Resource;
use schooladmin_core::types::FormFields;

use crate::common::NamedRef;

/// Weekdays offered by the schedule form, in display order.
pub const SCHOOL_DAYS: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// One lesson slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Backend identifier.
    pub id: u64,
    /// Day of week, as the backend spells it (`Monday`).
    pub day: String,
    /// Start time, `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    /// End time, `HH:MM` or `HH:MM:SS`.
    pub end_time: String,
    /// Foreign keys, present on some endpoints.
    #[serde(default)]
    pub class_id: Option<u64>,
    #[serde(default)]
    pub subject_id: Option<u64>,
    #[serde(default)]
    pub teacher_id: Option<u64>,
    /// Joined class.
    #[serde(default, rename = "Class")]
    pub class: Option<NamedRef>,
    /// Joined subject.
    #[serde(default, rename = "Subject")]
    pub subject: Option<NamedRef>,
    /// Joined teacher.
    #[serde(default, rename = "Teacher")]
    pub teacher: Option<NamedRef>,
}

impl Schedule {
    /// Empty manual-entry form, defaulting to Monday.
    pub fn create_form() -> FormFields {
        FormFields::new()
            .with("day", SCHOOL_DAYS[0])
            .with("startTime", "")
            .with("endTime", "")
            .with("classId", "")
            .with("subjectId", "")
            .with("teacherId", "")
    }

    /// `HH:MM - HH:MM` with seconds trimmed.
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            trim_seconds(&self.start_time),
            trim_seconds(&self.end_time)
        )
    }
}

fn trim_seconds(t: &str) -> &str {
    if t.len() == 8 && t.as_bytes()[5] == b':' {
        &t[..5]
    } else {
        t
    }
}

fn id_text(id: Option<u64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

impl Resource for Schedule {
    const PATH: &'static str = "/schedules";
    const COLLECTION_KEY: &'static str = "schedules";
    const LABEL: &'static str = "Schedule";

    fn id(&self) -> u64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        FormFields::new()
            .with("day", self.day.clone())
            .with("startTime", self.start_time.clone())
            .with("endTime", self.end_time.clone())
            .with("classId", id_text(self.class_id))
            .with("subjectId", id_text(self.subject_id))
            .with("teacherId", id_text(self.teacher_id))
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "class" => self.class.as_ref().map(|c| c.name.clone()),
            "teacher" => self.teacher.as_ref().map(|t| t.name.clone()),
            "subject" => self.subject.as_ref().map(|s| s.name.clone()),
            "day" => Some(self.day.clone()),
            _ => None,
        }
    }
}
