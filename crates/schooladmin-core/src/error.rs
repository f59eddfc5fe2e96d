//! Unified application error types for SchoolAdmin.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The list controller is the only
//! place that turns an `AppError` into user-facing text.

use std::fmt;
use thiserror::Error;

/// Fallback text shown when a failed request carries no server message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// No credential is stored; the caller must go through login first.
    AuthMissing,
    /// The credential is valid but does not grant access.
    Authorization,
    /// Transport-level failure (connection refused, timeout, DNS).
    Network,
    /// The server answered with a non-success status.
    ServerRejected,
    /// A success response whose payload could not be interpreted.
    ResponseShape,
    /// Input validation failed before any request was sent.
    Validation,
    /// The requested resource was not found locally.
    NotFound,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthMissing => write!(f, "AUTH_MISSING"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Network => write!(f, "NETWORK"),
            Self::ServerRejected => write!(f, "SERVER_REJECTED"),
            Self::ResponseShape => write!(f, "RESPONSE_SHAPE"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout SchoolAdmin.
///
/// `server_message` is only populated for [`ErrorKind::ServerRejected`]
/// errors whose response body carried a `message` field. It is kept apart
/// from `message` so that it can be shown to the user verbatim.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message (for logs).
    pub message: String,
    /// HTTP status for server rejections.
    pub status: Option<u16>,
    /// Message supplied by the server, surfaced verbatim.
    pub server_message: Option<String>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            server_message: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            server_message: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create an auth-missing error.
    pub fn auth_missing() -> Self {
        Self::new(ErrorKind::AuthMissing, "No credential stored")
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Create a server-rejected error from a status code and the optional
    /// `message` field of the response body.
    pub fn server_rejected(status: u16, server_message: Option<String>) -> Self {
        let message = match &server_message {
            Some(m) => format!("HTTP {status}: {m}"),
            None => format!("HTTP {status}"),
        };
        Self {
            kind: ErrorKind::ServerRejected,
            message,
            status: Some(status),
            server_message,
            source: None,
        }
    }

    /// Create a response-shape error.
    pub fn response_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResponseShape, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the caller should be sent to the login flow.
    pub fn is_auth_missing(&self) -> bool {
        self.kind == ErrorKind::AuthMissing
    }

    /// Text to show the user for this error.
    ///
    /// Server-supplied messages win. Validation and authorization errors
    /// are raised locally with readable text, so their message is used
    /// as-is. Everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(m) = &self.server_message {
            return m.clone();
        }
        match self.kind {
            ErrorKind::Validation | ErrorKind::Authorization | ErrorKind::NotFound => {
                self.message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            status: self.status,
            server_message: self.server_message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
