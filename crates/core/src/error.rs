//! Client-side validation error model.

use thiserror::Error;

/// Result type used across the core layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Failure detected before a request is issued.
///
/// The remote API re-validates everything; these checks only spare a round
/// trip for input that can never succeed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// Reject blank strings.
pub(crate) fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Minimal address shape check: one `@` with non-empty halves.
pub(crate) fn require_address(field: &str, value: &str) -> DomainResult<()> {
    match value.trim().split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(DomainError::validation(format!(
            "{field} must be an address of the form local@domain"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_rejected() {
        assert!(require_non_blank("name", "  ").is_err());
        assert!(require_non_blank("name", "x").is_ok());
    }

    #[test]
    fn address_shape() {
        assert!(require_address("email", "a@b.org").is_ok());
        assert!(require_address("email", "a@").is_err());
        assert!(require_address("email", "@b").is_err());
        assert!(require_address("email", "a@b@c").is_err());
        assert!(require_address("email", "plain").is_err());
    }
}
