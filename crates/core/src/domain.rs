//! Hosted mail domains.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainResult, require_non_blank};
use crate::id::DomainId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub id: DomainId,
    pub name: String,
    pub active: bool,
    #[serde(default, with = "crate::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for Domain {
    type Id = DomainId;

    fn id(&self) -> DomainId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDomain {
    pub name: String,
    pub active: bool,
}

impl CreateDomain {
    pub fn new(name: impl Into<String>, active: bool) -> DomainResult<Self> {
        let name = name.into().trim().to_lowercase();
        require_non_blank("domain name", &name)?;
        Ok(Self { name, active })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateDomain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateDomain {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            require_non_blank("domain name", name)?;
        }
        Ok(())
    }
}
