//! The [`AuthGate`]: entry point every console session goes through.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use schooladmin_core::config::api::ApiConfig;
use schooladmin_core::config::auth::AuthConfig;
use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::credential::{Credential, CredentialProvider};
use schooladmin_core::traits::transport::{ApiRequest, Transport};
use schooladmin_entity::AdminUser;

use super::input::LoginInput;
use super::token;

/// Shown when a login fails without a server explanation.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Check username/password.";
/// Shown when the credentials are valid but the user is not an admin.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. Not an admin.";

const LOGIN_MUTATION: &str = r#"
mutation Login($username: String!, $password: String!, $role: String!) {
  login(username: $username, password: $password, role: $role) {
    token
    user {
      id
      username
      name
      role
    }
  }
}"#;

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<LoginData>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct LoginData {
    #[serde(default)]
    login: Option<LoginPayload>,
}

#[derive(Deserialize)]
struct LoginPayload {
    token: String,
    user: AdminUser,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// Signs the admin in and out, and answers "is someone signed in?".
#[derive(Debug, Clone)]
pub struct AuthGate {
    /// Transport used for the GraphQL endpoint (no bearer token needed).
    transport: Arc<dyn Transport>,
    /// Where the token is stored.
    credentials: Arc<dyn CredentialProvider>,
    /// Absolute GraphQL URL.
    graphql_url: String,
    /// Role requested at login and required on the returned user.
    required_role: String,
}

impl AuthGate {
    /// Create a gate.
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialProvider>,
        graphql_url: impl Into<String>,
        required_role: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            credentials,
            graphql_url: graphql_url.into(),
            required_role: required_role.into(),
        }
    }

    /// Create a gate from the `[api]` and `[auth]` configuration sections.
    pub fn from_config(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialProvider>,
        api: &ApiConfig,
        auth: &AuthConfig,
    ) -> Self {
        Self::new(
            transport,
            credentials,
            api.graphql_url.clone(),
            auth.required_role.clone(),
        )
    }

    /// Run the login mutation and store the returned token.
    ///
    /// GraphQL errors are returned as authorization errors carrying the
    /// server's first message verbatim. A user without the required role
    /// is refused and nothing is stored.
    pub async fn login(&self, input: LoginInput) -> AppResult<AdminUser> {
        input.check()?;

        let request = ApiRequest::post(self.graphql_url.clone()).body(json!({
            "query": LOGIN_MUTATION,
            "variables": {
                "username": input.username,
                "password": input.password,
                "role": self.required_role,
            }
        }));
        let response = self.transport.request(request).await?;

        let parsed: GraphQlResponse = serde_json::from_value(response.body)
            .map_err(|e| AppError::response_shape(format!("Unexpected login response: {e}")))?;

        if let Some(error) = parsed.errors.as_ref().and_then(|errors| errors.first()) {
            warn!(username = %input.username, "Login rejected by server");
            return Err(AppError::authorization(error.message.clone()));
        }

        let payload = parsed
            .data
            .and_then(|d| d.login)
            .ok_or_else(|| AppError::response_shape("Login response carried no token"))?;

        if !payload.user.has_role(&self.required_role) {
            warn!(
                username = %payload.user.username,
                role = %payload.user.role,
                "Login refused for non-admin user"
            );
            return Err(AppError::authorization(ACCESS_DENIED_MESSAGE));
        }

        self.credentials.set(Credential {
            token: payload.token,
            username: Some(payload.user.username.clone()),
            name: payload.user.name.clone(),
            role: Some(payload.user.role.clone()),
        })?;

        info!(username = %payload.user.username, "Signed in");
        Ok(payload.user)
    }

    /// Forget the stored credential.
    pub fn logout(&self) -> AppResult<()> {
        self.credentials.clear()?;
        info!("Signed out");
        Ok(())
    }

    /// The stored token, or `AuthMissing`.
    ///
    /// A token whose `exp` has passed is cleared and treated as absent.
    pub fn require(&self) -> AppResult<String> {
        let stored = self.credentials.get().ok_or_else(AppError::auth_missing)?;
        if token::is_expired(&stored, chrono::Utc::now().timestamp()) {
            info!("Stored token has expired");
            self.credentials.clear()?;
            return Err(AppError::auth_missing());
        }
        Ok(stored)
    }

    /// The stored credential, if any.
    pub fn current(&self) -> Option<Credential> {
        self.credentials.credential()
    }
}
