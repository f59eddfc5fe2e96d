//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};

use schooladmin_client::api::ApiClient;
use schooladmin_client::credential::MemoryCredentialStore;
use schooladmin_controller::{ListResourceController, ResourceConfig};
use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::{ApiRequest, ApiResponse, FixedAnswer, HttpMethod, Resource, Transport};

/// What the fake backend answers, and after how long.
pub struct Reply {
    pub delay: Duration,
    pub result: AppResult<ApiResponse>,
}

impl Reply {
    /// Immediate 200 with `body`.
    pub fn ok(body: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(ApiResponse::ok(body)),
        }
    }

    /// Immediate rejection with an optional server message.
    pub fn rejected(status: u16, message: Option<&str>) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(AppError::server_rejected(status, message.map(str::to_string))),
        }
    }

    /// Immediate connection failure.
    pub fn network_down() -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(AppError::network("connection refused")),
        }
    }

    /// Delay this reply.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Route = Box<dyn Fn(&ApiRequest) -> Reply + Send + Sync>;

/// In-process stand-in for the admin API. Records every request.
pub struct FakeBackend {
    calls: Mutex<Vec<ApiRequest>>,
    route: Route,
}

impl std::fmt::Debug for FakeBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeBackend")
            .field("calls", &self.calls.lock().unwrap().len())
            .finish()
    }
}

impl FakeBackend {
    /// Create a backend answering with `route`.
    pub fn new(route: impl Fn(&ApiRequest) -> Reply + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            route: Box::new(route),
        })
    }

    /// Every request seen so far.
    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Requests seen with `method`.
    pub fn count(&self, method: HttpMethod) -> usize {
        self.calls().iter().filter(|r| r.method == method).count()
    }

    /// The most recent request with `method`.
    pub fn last(&self, method: HttpMethod) -> Option<ApiRequest> {
        self.calls().into_iter().rev().find(|r| r.method == method)
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn request(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        self.calls.lock().unwrap().push(request.clone());
        let reply = (self.route)(&request);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

/// Test application context
pub struct TestApp {
    /// The fake API
    pub backend: Arc<FakeBackend>,
    /// Credential store shared by the client
    pub credentials: Arc<MemoryCredentialStore>,
    /// Authenticated client over the fake API
    pub client: ApiClient,
}

impl TestApp {
    /// A signed-in app over `route`.
    pub fn new(route: impl Fn(&ApiRequest) -> Reply + Send + Sync + 'static) -> Self {
        Self::build(route, Some("test-token"))
    }

    /// An app signed in with `token`.
    pub fn with_token(
        route: impl Fn(&ApiRequest) -> Reply + Send + Sync + 'static,
        token: &str,
    ) -> Self {
        Self::build(route, Some(token))
    }

    /// An app with no stored credential.
    pub fn signed_out(route: impl Fn(&ApiRequest) -> Reply + Send + Sync + 'static) -> Self {
        Self::build(route, None)
    }

    fn build(
        route: impl Fn(&ApiRequest) -> Reply + Send + Sync + 'static,
        token: Option<&str>,
    ) -> Self {
        let backend = FakeBackend::new(route);
        let credentials = Arc::new(match token {
            Some(token) => MemoryCredentialStore::with_token(token),
            None => MemoryCredentialStore::new(),
        });
        let client = ApiClient::new(backend.clone(), credentials.clone());
        Self {
            backend,
            credentials,
            client,
        }
    }

    /// A controller whose confirmation prompts always answer `confirm`.
    pub fn controller<T: Resource>(
        &self,
        config: ResourceConfig<T>,
        confirm: bool,
    ) -> ListResourceController<T> {
        ListResourceController::new(self.client.clone(), Arc::new(FixedAnswer(confirm)), config)
    }
}

/// A JWT-shaped token whose payload carries `exp`. The signature is not
/// checked client-side.
pub fn token_expiring_at(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({"sub": 1, "exp": exp}).to_string());
    format!("{header}.{payload}.signature")
}

/// A `/students` page body.
pub fn student_page(ids: &[u64], total_pages: u64) -> Value {
    let students: Vec<Value> = ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "name": format!("Student {id}"), "isActive": true}))
        .collect();
    serde_json::json!({
        "students": students,
        "totalPages": total_pages,
        "totalItems": total_pages * 10,
    })
}
