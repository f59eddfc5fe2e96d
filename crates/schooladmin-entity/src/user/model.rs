//! Signed-in administrator returned by the login mutation.

use serde::{Deserialize, Serialize};

use crate::common::string_or_number;

/// The user a login token was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    /// GraphQL `ID`, string or number depending on the server.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Role name, e.g. `admin`.
    pub role: String,
}

impl AdminUser {
    /// Check whether this user holds `role` (case-insensitive).
    pub fn has_role(&self, role: &str) -> bool {
        self.role.eq_ignore_ascii_case(role)
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id() {
        let u: AdminUser = serde_json::from_value(json!({
            "id": 1, "username": "root", "role": "Admin"
        }))
        .unwrap();
        assert_eq!(u.id, "1");
        assert!(u.has_role("admin"));
        assert_eq!(u.display_name(), "root");
    }
}
