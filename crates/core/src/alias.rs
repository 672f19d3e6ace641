//! Aliases: forwarding addresses under a domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainResult, require_address, require_non_blank};
use crate::id::{AliasId, DomainId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
    pub id: AliasId,
    #[serde(default)]
    pub domain_id: Option<DomainId>,
    /// Source address as reported by the server (e.g. `info@example.com`).
    pub name: String,
    pub to: String,
    pub active: bool,
    #[serde(default, with = "crate::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Alias {
    /// The address shown to the operator; taken verbatim from the server.
    pub fn full_address(&self) -> &str {
        &self.name
    }
}

impl Entity for Alias {
    type Id = AliasId;

    fn id(&self) -> AliasId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAlias {
    /// Source local part; fixed once created.
    pub name: String,
    pub to: String,
}

impl CreateAlias {
    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("alias source", &self.name)?;
        require_address("alias destination", &self.to)
    }
}

/// The source of an alias cannot be changed, only its target and state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateAlias {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateAlias {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(to) = &self.to {
            require_address("alias destination", to)?;
        }
        Ok(())
    }
}
