//! Error types for the document service client.
//!
//! # Design
//! Every failed call surfaces as one `ApiError` value whatever went wrong:
//! `status` is the HTTP status when a response was received and `0` when it
//! was not. `kind` lets Rust callers match without comparing numbers, and
//! `errors` carries the service's field-level validation detail when it
//! sends any.
//!
//! `ConfigError` is separate because it can only happen while constructing
//! the client, before any request exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when the client cannot be constructed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// What stage of the call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received (DNS, connect, TLS, broken body stream).
    /// Always carries status 0.
    Network,

    /// The service answered with a non-success status.
    Http,

    /// The service answered with a success status but the body did not
    /// decode into the expected shape.
    Decode,

    /// The request payload could not be serialized. Never reached the
    /// network, so status is 0.
    Encode,
}

/// One field-level error reported by the service, e.g.
/// `{"msg":"Template_Name is required","param":"Template_Name","location":"body"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// The uniform error value returned by every client operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status, or `0` when no response was received.
    pub status: u16,
    pub errors: Option<Vec<FieldError>>,
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Network,
            message: message.into(),
            status: 0,
            errors: None,
        }
    }

    pub fn http(status: u16, message: impl Into<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            kind: ErrorKind::Http,
            message: message.into(),
            status,
            errors,
        }
    }

    pub fn decode(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: message.into(),
            status,
            errors: None,
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Encode,
            message: message.into(),
            status: 0,
            errors: None,
        }
    }

    /// True when no response was received at all.
    pub fn is_network(&self) -> bool {
        self.kind == ErrorKind::Network
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::Http && self.status == 404
    }

    pub fn first_field_error(&self) -> Option<&FieldError> {
        self.errors.as_ref().and_then(|errors| errors.first())
    }
}
