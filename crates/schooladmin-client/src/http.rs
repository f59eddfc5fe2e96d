//! reqwest-backed [`Transport`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use tracing::{debug, warn};

use schooladmin_core::config::api::ApiConfig;
use schooladmin_core::error::{AppError, ErrorKind};
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
use schooladmin_core::types::ApiErrorBody;

/// HTTP transport rooted at a base URL.
///
/// Relative request paths are joined onto the base URL; absolute URLs
/// (the GraphQL endpoint) are used as-is.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Shared reqwest client carrying the request timeout.
    client: Client,
    /// Base URL without a trailing slash.
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a transport from the `[api]` configuration section.
    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        Self::new(config.base_url.clone(), config.request_timeout())
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a request, including query parameters.
    fn resolve(&self, request: &ApiRequest) -> AppResult<Url> {
        let raw = if request.path.starts_with("http://") || request.path.starts_with("https://") {
            request.path.clone()
        } else {
            format!(
                "{}/{}",
                self.base_url,
                request.path.trim_start_matches('/')
            )
        };

        let mut url = Url::parse(&raw)
            .map_err(|e| AppError::configuration(format!("Invalid request URL '{raw}': {e}")))?;
        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .params
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(url)
    }
}

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Map a reqwest failure onto a network error.
pub fn map_reqwest_error(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        format!("Request timed out: {err}")
    } else if err.is_connect() {
        format!("Connection failed: {err}")
    } else {
        format!("Request failed: {err}")
    };
    AppError::with_source(ErrorKind::Network, message, err)
}

/// Parse a response body, treating empty or non-JSON text as `Null`.
fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or(serde_json::Value::Null)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let url = self.resolve(&request)?;
        let mut builder = self.client.request(method_of(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_reqwest_error)?;
        let body = parse_body(&text);

        if !(200..300).contains(&status) {
            let server_message = ApiErrorBody::message_from(&body);
            warn!(
                method = %request.method,
                path = %request.path,
                status,
                "Request rejected by server"
            );
            return Err(AppError::server_rejected(status, server_message));
        }

        debug!(method = %request.method, path = %request.path, status, "Request completed");
        Ok(ApiResponse { status, body })
    }
}
