use mailpanel_core::{CreateDomain, Domain, DomainId, UpdateDomain, User};
use serde::Deserialize;

use crate::error::ApiError;
use crate::transport::{Ack, ApiClient};

#[derive(Deserialize)]
struct DomainList {
    #[serde(default)]
    domains: Vec<Domain>,
}

#[derive(Deserialize)]
struct DomainEnvelope {
    domain: Domain,
}

#[derive(Deserialize)]
struct ManagerList {
    #[serde(default)]
    managers: Vec<User>,
}

pub struct DomainsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> DomainsApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Every domain (`GET /domains`).
    pub async fn list_all(&self) -> Result<Vec<Domain>, ApiError> {
        let list: DomainList = self.api.get("/domains").await?;
        Ok(list.domains)
    }

    /// Domains assigned to the caller (`GET /me/domains`).
    pub async fn list_mine(&self) -> Result<Vec<Domain>, ApiError> {
        let list: DomainList = self.api.get("/me/domains").await?;
        Ok(list.domains)
    }

    pub async fn managers(&self, id: DomainId) -> Result<Vec<User>, ApiError> {
        let list: ManagerList = self.api.get(&format!("/domains/{id}/managers")).await?;
        Ok(list.managers)
    }

    pub async fn create(&self, cmd: &CreateDomain) -> Result<Domain, ApiError> {
        let env: DomainEnvelope = self.api.post("/domains", cmd).await?;
        Ok(env.domain)
    }

    pub async fn update(&self, id: DomainId, cmd: &UpdateDomain) -> Result<Domain, ApiError> {
        cmd.validate()?;
        let env: DomainEnvelope = self.api.put(&format!("/domains/{id}"), cmd).await?;
        Ok(env.domain)
    }

    /// Removes the domain with its mailboxes and aliases.
    pub async fn delete(&self, id: DomainId) -> Result<Ack, ApiError> {
        self.api.delete(&format!("/domains/{id}")).await
    }
}
