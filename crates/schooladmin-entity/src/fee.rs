//! Fee (billing item) entity model.

use serde::{Deserialize, Serialize};

use schooladmin_core::traits::Resource;
use schooladmin_core::types::FormFields;

use crate::common::string_or_number;

/// A billable fee type, e.g. monthly tuition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fee {
    /// Backend identifier.
    pub id: u64,
    /// Fee name.
    pub name: String,
    /// Default amount as a decimal string.
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
}

impl Fee {
    /// Amount as a number. Unparsable amounts count as zero.
    pub fn amount_value(&self) -> f64 {
        self.amount.trim().parse().unwrap_or(0.0)
    }

    /// Empty form for a new fee type.
    pub fn create_form() -> FormFields {
        FormFields::new().with("name", "").with("amount", "")
    }
}

impl Resource for Fee {
    const PATH: &'static str = "/fees";
    const COLLECTION_KEY: &'static str = "fees";
    const LABEL: &'static str = "Fee";

    fn id(&self) -> u64 {
        self.id
    }

    fn form_fields(&self) -> FormFields {
        FormFields::new()
            .with("name", self.name.clone())
            .with("amount", self.amount.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decimal_amount_from_either_form() {
        let fee: Fee =
            serde_json::from_value(json!({"id": 1, "name": "SPP", "amount": "150000.00"})).unwrap();
        assert_eq!(fee.amount_value(), 150_000.0);

        let fee: Fee =
            serde_json::from_value(json!({"id": 2, "name": "Buku", "amount": 85000})).unwrap();
        assert_eq!(fee.form_fields().text("amount"), Some("85000"));
    }
}
