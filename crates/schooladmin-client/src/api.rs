//! Authenticated API client.

use std::sync::Arc;

use tracing::{debug, info};

use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::credential::CredentialProvider;
use schooladmin_core::traits::transport::{ApiRequest, ApiResponse, Transport};

use crate::auth::token;

/// Sends requests with the stored bearer token attached.
///
/// The credential is read before every request. When none is stored, or
/// the stored token's `exp` has passed, the call fails with `AuthMissing`
/// and the transport is never touched. An expired token is also cleared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Create a client over a transport and a credential source.
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// The credential source this client reads from.
    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    /// Whether an unexpired credential is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.credentials
            .get()
            .is_some_and(|stored| !token::is_expired(&stored, chrono::Utc::now().timestamp()))
    }

    fn bearer_token(&self) -> AppResult<String> {
        let stored = self.credentials.get().ok_or_else(AppError::auth_missing)?;
        if token::is_expired(&stored, chrono::Utc::now().timestamp()) {
            info!("Stored token has expired");
            self.credentials.clear()?;
            return Err(AppError::auth_missing());
        }
        Ok(stored)
    }

    /// Attach the bearer token and send `request`.
    pub async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let token = self.bearer_token()?;
        let request = request.header("Authorization", format!("Bearer {token}"));
        debug!(method = %request.method, path = %request.path, "Sending request");
        self.transport.request(request).await
    }

    /// GET `path` with query parameters.
    pub async fn get(
        &self,
        path: &str,
        params: impl IntoIterator<Item = (String, String)>,
    ) -> AppResult<ApiResponse> {
        self.send(ApiRequest::get(path).params(params)).await
    }

    /// POST `body` to `path`.
    pub async fn post(&self, path: &str, body: serde_json::Value) -> AppResult<ApiResponse> {
        self.send(ApiRequest::post(path).body(body)).await
    }

    /// PUT `body` to `path`.
    pub async fn put(&self, path: &str, body: serde_json::Value) -> AppResult<ApiResponse> {
        self.send(ApiRequest::put(path).body(body)).await
    }

    /// DELETE `path`.
    pub async fn delete(&self, path: &str) -> AppResult<ApiResponse> {
        self.send(ApiRequest::delete(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use schooladmin_core::traits::HttpMethod;
    use serde_json::json;

    use crate::credential::MemoryCredentialStore;

    #[derive(Debug, Default)]
    struct Recorder {
        seen: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn request(&self, request: ApiRequest) -> AppResult<ApiResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(ApiResponse::ok(json!({})))
        }
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() {
        let transport = Arc::new(Recorder::default());
        let client = ApiClient::new(transport.clone(), Arc::new(MemoryCredentialStore::new()));

        let err = client.get("/students", Vec::new()).await.unwrap_err();
        assert!(err.is_auth_missing());
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let transport = Arc::new(Recorder::default());
        let client = ApiClient::new(
            transport.clone(),
            Arc::new(MemoryCredentialStore::with_token("abc")),
        );

        client.put("/teachers/3", json!({"name": "Bu Rina"})).await.unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Put);
        assert_eq!(seen[0].header_value("Authorization"), Some("Bearer abc"));
        assert_eq!(seen[0].body, Some(json!({"name": "Bu Rina"})));
    }

    #[tokio::test]
    async fn test_expired_token_sends_nothing() {
        let expired = format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(r#"{"id":1,"exp":1000}"#)
        );
        let transport = Arc::new(Recorder::default());
        let store = Arc::new(MemoryCredentialStore::with_token(expired));
        let client = ApiClient::new(transport.clone(), store.clone());
        assert!(!client.is_authenticated());

        let err = client.get("/students", Vec::new()).await.unwrap_err();
        assert!(err.is_auth_missing());
        assert!(transport.seen.lock().unwrap().is_empty());
        assert!(store.get().is_none());
    }
}
