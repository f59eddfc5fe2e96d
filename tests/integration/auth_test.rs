//! Integration tests for the login gate and credential stores.

mod helpers;

use std::sync::Arc;

use serde_json::{Value, json};

use schooladmin_client::api::ApiClient;
use schooladmin_client::auth::{ACCESS_DENIED_MESSAGE, AuthGate, LoginInput};
use schooladmin_client::credential::{FileCredentialStore, MemoryCredentialStore};
use schooladmin_core::error::ErrorKind;
use schooladmin_core::traits::{CredentialProvider, HttpMethod};

use helpers::{FakeBackend, Reply, token_expiring_at};

const GRAPHQL_URL: &str = "http://localhost:4000/graphql";
/// 2100-01-01T00:00:00Z
const YEAR_2100: i64 = 4_102_444_800;

fn login_reply(role: &str) -> Value {
    json!({
        "data": {
            "login": {
                "token": "jwt-abc",
                "user": {"id": "1", "username": "admin", "name": "Head Admin", "role": role}
            }
        }
    })
}

fn gate(backend: &Arc<FakeBackend>, store: Arc<dyn CredentialProvider>) -> AuthGate {
    AuthGate::new(backend.clone(), store, GRAPHQL_URL, "ADMIN")
}

#[tokio::test]
async fn test_login_stores_credential() {
    let backend = FakeBackend::new(|_| Reply::ok(login_reply("ADMIN")));
    let store = Arc::new(MemoryCredentialStore::new());
    let gate = gate(&backend, store.clone());

    let user = gate
        .login(LoginInput::new("  admin ", "secret"))
        .await
        .unwrap();
    assert_eq!(user.username, "admin");
    assert_eq!(user.display_name(), "Head Admin");

    let request = backend.last(HttpMethod::Post).unwrap();
    assert_eq!(request.path, GRAPHQL_URL);
    assert!(request.header_value("Authorization").is_none());
    let body = request.body.unwrap();
    assert_eq!(body["variables"]["username"], "admin");
    assert_eq!(body["variables"]["role"], "ADMIN");
    assert!(body["query"].as_str().unwrap().contains("login("));

    assert_eq!(store.get().as_deref(), Some("jwt-abc"));
    let stored = gate.current().unwrap();
    assert_eq!(stored.role.as_deref(), Some("ADMIN"));
    assert_eq!(stored.name.as_deref(), Some("Head Admin"));
}

#[tokio::test]
async fn test_graphql_error_is_shown_verbatim() {
    let backend = FakeBackend::new(|_| {
        Reply::ok(json!({"errors": [{"message": "Invalid credentials"}], "data": null}))
    });
    let store = Arc::new(MemoryCredentialStore::new());
    let gate = gate(&backend, store.clone());

    let err = gate
        .login(LoginInput::new("admin", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(err.user_message("fallback"), "Invalid credentials");
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_non_admin_is_refused() {
    let backend = FakeBackend::new(|_| Reply::ok(login_reply("TEACHER")));
    let store = Arc::new(MemoryCredentialStore::new());
    let gate = gate(&backend, store.clone());

    let err = gate
        .login(LoginInput::new("guru", "secret"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message("fallback"), ACCESS_DENIED_MESSAGE);
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_role_check_ignores_case() {
    let backend = FakeBackend::new(|_| Reply::ok(login_reply("admin")));
    let store = Arc::new(MemoryCredentialStore::new());
    assert!(gate(&backend, store).login(LoginInput::new("admin", "x")).await.is_ok());
}

#[tokio::test]
async fn test_blank_username_sends_nothing() {
    let backend = FakeBackend::new(|_| Reply::ok(login_reply("ADMIN")));
    let gate = gate(&backend, Arc::new(MemoryCredentialStore::new()));

    let err = gate.login(LoginInput::new("   ", "secret")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.user_message("fallback"), "Username is required");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let backend = FakeBackend::new(|_| Reply::network_down());
    let gate = gate(&backend, Arc::new(MemoryCredentialStore::new()));

    let err = gate.login(LoginInput::new("admin", "x")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
}

#[tokio::test]
async fn test_logout_blocks_requests() {
    let backend = FakeBackend::new(|_| Reply::ok(json!([])));
    let store = Arc::new(MemoryCredentialStore::with_token("t"));
    let gate = gate(&backend, store.clone());
    let client = ApiClient::new(backend.clone(), store.clone());

    assert!(gate.require().is_ok());
    gate.logout().unwrap();

    assert!(gate.require().unwrap_err().is_auth_missing());
    let err = client.get("/students", Vec::new()).await.unwrap_err();
    assert!(err.is_auth_missing());
    assert!(backend.calls().is_empty());
}

#[test]
fn test_expired_token_is_cleared() {
    let backend = FakeBackend::new(|_| Reply::ok(json!({})));
    let store = Arc::new(MemoryCredentialStore::with_token(token_expiring_at(1_000)));
    let gate = gate(&backend, store.clone());

    assert!(gate.require().unwrap_err().is_auth_missing());
    assert!(store.get().is_none());
}

#[test]
fn test_unexpired_token_is_kept() {
    let backend = FakeBackend::new(|_| Reply::ok(json!({})));
    let token = token_expiring_at(YEAR_2100);
    let store = Arc::new(MemoryCredentialStore::with_token(token.clone()));
    let gate = gate(&backend, store);

    assert_eq!(gate.require().unwrap(), token);
}

#[tokio::test]
async fn test_login_persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("credentials.json");

    let backend = FakeBackend::new(|_| Reply::ok(login_reply("ADMIN")));
    let store = Arc::new(FileCredentialStore::open(&path).unwrap());
    gate(&backend, store)
        .login(LoginInput::new("admin", "secret"))
        .await
        .unwrap();

    // A fresh process sees the same login.
    let reopened = FileCredentialStore::open(&path).unwrap();
    assert_eq!(reopened.get().as_deref(), Some("jwt-abc"));
    assert_eq!(
        reopened.credential().unwrap().username.as_deref(),
        Some("admin")
    );

    reopened.clear().unwrap();
    assert!(!path.exists());
    assert!(FileCredentialStore::open(&path).unwrap().get().is_none());
}
