//! Client error model.
//!
//! Every remote failure lands in [`ApiError`]; screens turn it into exactly
//! one operator-facing string with [`ApiError::user_message`].

use mailpanel_auth::AuthzError;
use mailpanel_core::DomainError;
use thiserror::Error;

use crate::messages;

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The credential is missing, expired or revoked (global effect).
    Authentication,
    /// The caller's scope does not cover the resource (local effect).
    Authorization,
    /// Input rejected, locally or by the server.
    Validation,
    NotFound,
    Conflict,
    /// Connection-level failure; never retried.
    Transport,
    Server,
    /// The server answered with something we could not read.
    Protocol,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("session is not valid (401)")]
    Unauthenticated,

    #[error("forbidden: {}", .message.as_deref().unwrap_or("insufficient scope"))]
    Forbidden { message: Option<String> },

    #[error("rejected: {}", .message.as_deref().unwrap_or("invalid request"))]
    Validation { message: Option<String> },

    #[error("not found: {}", .message.as_deref().unwrap_or("no such resource"))]
    NotFound { message: Option<String> },

    #[error("conflict: {}", .message.as_deref().unwrap_or("resource already exists"))]
    Conflict { message: Option<String> },

    #[error("server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    #[error("unexpected status ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error(transparent)]
    InvalidInput(#[from] DomainError),

    #[error(transparent)]
    NotPermitted(#[from] AuthzError),
}

impl ApiError {
    /// Map a non-success status and the server's message (if any).
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthenticated,
            403 => ApiError::Forbidden { message },
            400 | 422 => ApiError::Validation { message },
            404 => ApiError::NotFound { message },
            409 => ApiError::Conflict { message },
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Status { status, message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Unauthenticated => ErrorKind::Authentication,
            ApiError::Forbidden { .. } => ErrorKind::Authorization,
            ApiError::NotPermitted(AuthzError::Unauthenticated) => ErrorKind::Authentication,
            ApiError::NotPermitted(AuthzError::Forbidden { .. }) => ErrorKind::Authorization,
            ApiError::Validation { .. } | ApiError::InvalidInput(_) => ErrorKind::Validation,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Conflict { .. } => ErrorKind::Conflict,
            ApiError::Network(_) => ErrorKind::Transport,
            ApiError::Server { .. } | ApiError::Status { .. } => ErrorKind::Server,
            ApiError::Decode(_) => ErrorKind::Protocol,
        }
    }

    /// Message the server supplied with the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Forbidden { message }
            | ApiError::Validation { message }
            | ApiError::NotFound { message }
            | ApiError::Conflict { message }
            | ApiError::Server { message, .. }
            | ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The single string shown to the operator.
    ///
    /// Server text first, then locally known causes, then `fallback`, then a
    /// generic message when `fallback` is empty.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self {
            ApiError::Unauthenticated | ApiError::NotPermitted(AuthzError::Unauthenticated) => {
                messages::SESSION_EXPIRED.to_string()
            }
            ApiError::InvalidInput(DomainError::Validation(msg))
            | ApiError::InvalidInput(DomainError::InvalidId(msg)) => msg.clone(),
            ApiError::NotPermitted(AuthzError::Forbidden { .. }) | ApiError::Forbidden { .. } => {
                messages::NOT_PERMITTED.to_string()
            }
            _ if fallback.trim().is_empty() => messages::GENERIC.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
