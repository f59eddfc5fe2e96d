//! Login form input.

use serde::{Deserialize, Serialize};
use validator::Validate;

use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;

/// Username and password as typed on the login prompt.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginInput {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginInput {
    /// Create an input, trimming surrounding whitespace from the username.
    pub fn new(username: impl AsRef<str>, password: impl Into<String>) -> Self {
        Self {
            username: username.as_ref().trim().to_string(),
            password: password.into(),
        }
    }

    /// Validate, reporting the first failing field in form order.
    pub fn check(&self) -> AppResult<()> {
        self.validate().map_err(|errors| {
            let fields = errors.field_errors();
            let message = ["username", "password"]
                .iter()
                .filter_map(|name| fields.get(*name))
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Invalid login input".to_string());
            AppError::validation(message)
        })
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginInput")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_checked_first() {
        let err = LoginInput::new("   ", "").check().unwrap_err();
        assert_eq!(err.user_message("x"), "Username is required");
    }

    #[test]
    fn test_missing_password() {
        let err = LoginInput::new("admin", "").check().unwrap_err();
        assert_eq!(err.user_message("x"), "Password is required");
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", LoginInput::new("admin", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
