//! Identity of the signed-in caller, classified from the `/me` payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use mailpanel_core::{DomainId, MailboxId, UserId};

use crate::Role;

/// An administrator or domain manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffIdentity {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// A mailbox owner signed in to the self-service console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailboxIdentity {
    pub id: MailboxId,
    pub domain_id: DomainId,
    pub name: String,
    /// Server-provided address, or `name@domain` built during classification.
    pub email: String,
    /// Set when `email` was built locally rather than sent by the server.
    pub email_synthesized: bool,
    pub active: bool,
    pub footer_text: Option<String>,
    pub has_active_autoresponder: bool,
}

/// Exactly one of the three variants; fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    Administrator(StaffIdentity),
    Manager(StaffIdentity),
    Mailbox(MailboxIdentity),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity payload is not a JSON object")]
    NotAnObject,

    #[error("identity payload is missing '{0}'")]
    MissingField(&'static str),

    #[error("unknown role '{0}'")]
    UnknownRole(String),

    #[error("unknown identity kind '{0}'")]
    UnknownKind(String),

    #[error("malformed identity payload: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
struct MailboxPayload {
    id: MailboxId,
    domain_id: DomainId,
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    footer_text: Option<String>,
    #[serde(default)]
    has_active_autoresponder: bool,
}

fn default_active() -> bool {
    true
}

impl Identity {
    /// Classify a `/me` response.
    ///
    /// An explicit `kind` tag wins when present. Otherwise the payload shape
    /// decides: a domain reference without a `role` is a mailbox owner, and
    /// anything else is a panel user classified by its `role` literal.
    pub fn classify(payload: Value) -> Result<Self, IdentityError> {
        let Value::Object(map) = payload else {
            return Err(IdentityError::NotAnObject);
        };

        if let Some(kind) = map.get("kind").and_then(Value::as_str) {
            let kind = kind.to_string();
            return match kind.as_str() {
                "administrator" => Ok(Identity::Administrator(staff(map)?)),
                "manager" | "user" => Ok(Identity::Manager(staff(map)?)),
                "mailbox" => Ok(Identity::Mailbox(mailbox(map)?)),
                _ => Err(IdentityError::UnknownKind(kind)),
            };
        }

        let role = map.get("role").and_then(Value::as_str).map(str::to_string);
        match role.as_deref() {
            None if map.contains_key("domain_id") => Ok(Identity::Mailbox(mailbox(map)?)),
            None => Err(IdentityError::MissingField("role")),
            Some("mailbox") => Ok(Identity::Mailbox(mailbox(map)?)),
            Some("administrator") => Ok(Identity::Administrator(staff(map)?)),
            Some("user") => Ok(Identity::Manager(staff(map)?)),
            Some(other) => Err(IdentityError::UnknownRole(other.to_string())),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Identity::Administrator(_) => Role::Administrator,
            Identity::Manager(_) => Role::Manager,
            Identity::Mailbox(_) => Role::Mailbox,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Identity::Administrator(s) | Identity::Manager(s) => &s.email,
            Identity::Mailbox(m) => &m.email,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Identity::Administrator(s) | Identity::Manager(s) => s.active,
            Identity::Mailbox(m) => m.active,
        }
    }

    /// Staff user id; `None` for mailbox owners.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Identity::Administrator(s) | Identity::Manager(s) => Some(s.id),
            Identity::Mailbox(_) => None,
        }
    }

    pub fn as_mailbox(&self) -> Option<&MailboxIdentity> {
        match self {
            Identity::Mailbox(m) => Some(m),
            Identity::Administrator(_) | Identity::Manager(_) => None,
        }
    }
}

fn staff(map: Map<String, Value>) -> Result<StaffIdentity, IdentityError> {
    for field in ["id", "email"] {
        if !map.contains_key(field) {
            return Err(IdentityError::MissingField(field));
        }
    }
    serde_json::from_value(Value::Object(map)).map_err(|e| IdentityError::Malformed(e.to_string()))
}

fn mailbox(map: Map<String, Value>) -> Result<MailboxIdentity, IdentityError> {
    for field in ["id", "domain_id", "name"] {
        if !map.contains_key(field) {
            return Err(IdentityError::MissingField(field));
        }
    }
    let domain_name = domain_name(&map);
    let payload: MailboxPayload = serde_json::from_value(Value::Object(map))
        .map_err(|e| IdentityError::Malformed(e.to_string()))?;

    let (email, email_synthesized) = match payload.email {
        Some(email) if !email.trim().is_empty() => (email, false),
        _ => {
            let domain = domain_name.unwrap_or_else(|| format!("domain-{}", payload.domain_id));
            (format!("{}@{}", payload.name, domain), true)
        }
    };

    Ok(MailboxIdentity {
        id: payload.id,
        domain_id: payload.domain_id,
        name: payload.name,
        email,
        email_synthesized,
        active: payload.active,
        footer_text: payload.footer_text,
        has_active_autoresponder: payload.has_active_autoresponder,
    })
}

/// Domain name if the payload carries one as `domain_name`, `domain`, or `domain.name`.
fn domain_name(map: &Map<String, Value>) -> Option<String> {
    let candidate = map
        .get("domain_name")
        .and_then(Value::as_str)
        .or_else(|| match map.get("domain") {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(Value::Object(d)) => d.get("name").and_then(Value::as_str),
            _ => None,
        })?;
    let candidate = candidate.trim();
    (!candidate.is_empty()).then(|| candidate.to_string())
}
