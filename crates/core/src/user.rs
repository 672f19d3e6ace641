//! Panel users: administrators and domain managers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::entity::Entity;
use crate::error::{DomainResult, require_address};
use crate::id::UserId;
use crate::password::require_password_len;

/// Role literal stored on a panel user.
///
/// Mailbox owners are not users; their role is synthesized by the identity
/// layer and never appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Administrator,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Administrator => "administrator",
            UserRole::User => "user",
        }
    }
}

impl core::fmt::Display for UserRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for UserRole {
    type Err = crate::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "administrator" | "admin" => Ok(UserRole::Administrator),
            "user" | "manager" => Ok(UserRole::User),
            other => Err(crate::DomainError::validation(format!(
                "unknown role '{other}' (expected administrator or user)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    pub role: UserRole,
    pub active: bool,
    #[serde(default, with = "crate::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Assigned domains, when the endpoint embeds them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<Vec<Domain>>,
}

impl User {
    /// "First Last", trimmed; empty when neither name is set.
    pub fn display_name(&self) -> String {
        let first = self.firstname.as_deref().unwrap_or("");
        let last = self.lastname.as_deref().unwrap_or("");
        format!("{first} {last}").trim().to_string()
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    pub role: UserRole,
    pub active: bool,
}

impl CreateUser {
    pub fn validate(&self) -> DomainResult<()> {
        require_address("email", &self.email)?;
        require_password_len("password", &self.password)
    }
}

/// Partial update; absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateUser {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(email) = &self.email {
            require_address("email", email)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::DomainError;

    #[test]
    fn decodes_api_payload() {
        let user: User = serde_json::from_value(json!({
            "id": 3,
            "email": "ops@example.com",
            "firstname": "Ada",
            "lastname": null,
            "role": "user",
            "active": true,
            "created_at": "2025-01-02 03:04:05",
            "updated_at": "2025-01-02T03:04:05Z"
        }))
        .unwrap();

        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.display_name(), "Ada");
        assert!(user.created_at.is_some());
        assert!(user.domains.is_none());
    }

    #[test]
    fn create_requires_address_and_long_password() {
        let mut cmd = CreateUser {
            email: "ops@example.com".to_string(),
            password: "longenough".to_string(),
            firstname: None,
            lastname: None,
            role: UserRole::User,
            active: true,
        };
        assert!(cmd.validate().is_ok());

        cmd.password = "short".to_string();
        assert!(matches!(cmd.validate(), Err(DomainError::Validation(_))));

        cmd.password = "longenough".to_string();
        cmd.email = "ops".to_string();
        assert!(cmd.validate().is_err());
    }

    #[test]
    fn update_omits_absent_fields() {
        let body = serde_json::to_value(UpdateUser {
            active: Some(false),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({ "active": false }));
    }

    #[test]
    fn role_parsing_accepts_aliases() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Administrator);
        assert_eq!("Manager".parse::<UserRole>().unwrap(), UserRole::User);
        assert!("mailbox".parse::<UserRole>().is_err());
    }
}
