//! Bill entity model.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use schooladmin_core::traits::Resource;
use schooladmin_core::types::FormFields;

use super::status::BillStatus;
use crate::common::{NamedRef, opt_string_or_number, string_or_number};

/// An invoice issued to a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Backend identifier.
    pub id: u64,
    /// Human-facing invoice number.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub bill_number: String,
    /// Amount as a decimal string.
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    /// Payment status.
    pub status: BillStatus,
    /// Due date (`YYYY-MM-DD`).
    #[serde(default)]
    pub due_date: Option<String>,
    /// URL of the uploaded payment proof, if any.
    #[serde(default)]
    pub payment_proof: Option<String>,
    /// Joined student (name and NIS).
    #[serde(default, rename = "Student")]
    pub student: Option<NamedRef>,
    /// Joined fee type.
    #[serde(default, rename = "Fee")]
    pub fee: Option<NamedRef>,
}

impl Bill {
    /// Amount as a number. Unparsable amounts count as zero.
    pub fn amount_value(&self) -> f64 {
        self.amount.trim().parse().unwrap_or(0.0)
    }

    /// Empty form for issuing a bill, defaulting the billing period to the
    /// month and year of `today`.
    pub fn create_form(today: chrono::NaiveDate) -> FormFields {
        FormFields::new()
            .with("studentId", "")
            .with("feeId", "")
            .with("dueDate", "")
            .with("customAmount", "")
            .with("month", today.month().to_string())
            .with("year", today.year().to_string())
    }
}

impl Resource for Bill {
    const PATH: &'static str = "/bills";
    const COLLECTION_KEY: &'static str = "bills";
    const LABEL: &'static str = "Bill";

    fn id(&self) -> u64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        FormFields::new()
            .with("dueDate", self.due_date.clone().unwrap_or_default())
            .with("customAmount", self.amount.clone())
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "student" => self.student.as_ref().map(|s| s.name.clone()),
            "fee" => self.fee.as_ref().map(|f| f.name.clone()),
            _ => None,
        }
    }
}
