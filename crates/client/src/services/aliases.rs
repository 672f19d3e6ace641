use mailpanel_core::{Alias, AliasId, CreateAlias, DomainId, UpdateAlias};
use serde::Deserialize;

use crate::error::ApiError;
use crate::transport::{Ack, ApiClient};

#[derive(Deserialize)]
struct AliasList {
    #[serde(default)]
    aliases: Vec<Alias>,
}

#[derive(Deserialize)]
struct AliasEnvelope {
    alias: Alias,
}

pub struct AliasesApi<'a> {
    api: &'a ApiClient,
}

impl<'a> AliasesApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, domain: DomainId) -> Result<Vec<Alias>, ApiError> {
        let list: AliasList = self.api.get(&format!("/domains/{domain}/aliases")).await?;
        Ok(list.aliases)
    }

    /// The returned alias carries the full source address chosen by the server.
    pub async fn create(&self, domain: DomainId, cmd: &CreateAlias) -> Result<Alias, ApiError> {
        cmd.validate()?;
        let env: AliasEnvelope = self.api.post(&format!("/domains/{domain}/aliases"), cmd).await?;
        Ok(env.alias)
    }

    pub async fn update(
        &self,
        domain: DomainId,
        id: AliasId,
        cmd: &UpdateAlias,
    ) -> Result<Alias, ApiError> {
        cmd.validate()?;
        let env: AliasEnvelope = self
            .api
            .put(&format!("/domains/{domain}/aliases/{id}"), cmd)
            .await?;
        Ok(env.alias)
    }

    pub async fn delete(&self, domain: DomainId, id: AliasId) -> Result<Ack, ApiError> {
        self.api.delete(&format!("/domains/{domain}/aliases/{id}")).await
    }
}
