//! Mailboxes: children of exactly one domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult, require_non_blank};
use crate::id::{DomainId, MailboxId};
use crate::password::require_password_len;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mailbox {
    pub id: MailboxId,
    #[serde(default)]
    pub domain_id: Option<DomainId>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub footer_text: Option<String>,
    #[serde(default)]
    pub has_active_autoresponder: bool,
    #[serde(default, with = "crate::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Mailbox {
    /// Full address: the server-reported email, else `name@domain_name`.
    pub fn address(&self, domain_name: &str) -> String {
        match self.email.as_deref() {
            Some(email) if !email.is_empty() => email.to_string(),
            _ => format!("{}@{}", self.name, domain_name),
        }
    }
}

impl Entity for Mailbox {
    type Id = MailboxId;

    fn id(&self) -> MailboxId {
        self.id
    }
}

fn require_local_part(value: &str) -> DomainResult<()> {
    require_non_blank("mailbox name", value)?;
    if value.contains('@') || value.chars().any(char::is_whitespace) {
        return Err(DomainError::validation(
            "mailbox name is the local part only (no '@' or whitespace)",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateMailbox {
    pub name: String,
    pub password: String,
    pub active: bool,
}

impl CreateMailbox {
    pub fn validate(&self) -> DomainResult<()> {
        require_local_part(&self.name)?;
        require_password_len("password", &self.password)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateMailbox {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateMailbox {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            require_local_part(name)?;
        }
        Ok(())
    }
}
