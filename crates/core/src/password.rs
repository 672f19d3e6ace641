//! Password payloads and the length/confirmation checks applied before submit.

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// Shortest password the console will submit.
pub const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn require_password_len(field: &str, value: &str) -> DomainResult<()> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "{field} must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn require_match(password: &str, confirmation: &str) -> DomainResult<()> {
    if password != confirmation {
        return Err(DomainError::validation("passwords do not match"));
    }
    Ok(())
}

/// Caller changes their own password (`PUT /me/password`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChange {
    /// Build from form input, checking length and that the repeat matches.
    pub fn new(
        current: impl Into<String>,
        new: impl Into<String>,
        repeat: &str,
    ) -> DomainResult<Self> {
        let current_password = current.into();
        let new_password = new.into();
        if current_password.is_empty() {
            return Err(DomainError::validation("current password must not be empty"));
        }
        require_password_len("new password", &new_password)?;
        require_match(&new_password, repeat)?;
        Ok(Self {
            current_password,
            new_password,
        })
    }
}

/// Administrator sets a password on someone else's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordReset {
    pub password: String,
}

impl PasswordReset {
    pub fn new(password: impl Into<String>, repeat: &str) -> DomainResult<Self> {
        let password = password.into();
        require_password_len("password", &password)?;
        require_match(&password, repeat)?;
        Ok(Self { password })
    }
}
