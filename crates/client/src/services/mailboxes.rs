use mailpanel_core::{CreateMailbox, DomainId, Mailbox, MailboxId, PasswordReset, UpdateMailbox};
use serde::Deserialize;

use crate::error::ApiError;
use crate::transport::{Ack, ApiClient};

#[derive(Deserialize)]
struct MailboxList {
    #[serde(default)]
    mailboxes: Vec<Mailbox>,
}

#[derive(Deserialize)]
struct MailboxEnvelope {
    mailbox: Mailbox,
}

/// Mailboxes under one domain.
pub struct MailboxesApi<'a> {
    api: &'a ApiClient,
}

impl<'a> MailboxesApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, domain: DomainId) -> Result<Vec<Mailbox>, ApiError> {
        let list: MailboxList = self.api.get(&format!("/domains/{domain}/mailboxes")).await?;
        Ok(list.mailboxes)
    }

    pub async fn create(&self, domain: DomainId, cmd: &CreateMailbox) -> Result<Mailbox, ApiError> {
        cmd.validate()?;
        let env: MailboxEnvelope = self
            .api
            .post(&format!("/domains/{domain}/mailboxes"), cmd)
            .await?;
        Ok(env.mailbox)
    }

    pub async fn update(
        &self,
        domain: DomainId,
        id: MailboxId,
        cmd: &UpdateMailbox,
    ) -> Result<Mailbox, ApiError> {
        cmd.validate()?;
        let env: MailboxEnvelope = self
            .api
            .put(&format!("/domains/{domain}/mailboxes/{id}"), cmd)
            .await?;
        Ok(env.mailbox)
    }

    pub async fn reset_password(
        &self,
        domain: DomainId,
        id: MailboxId,
        reset: &PasswordReset,
    ) -> Result<Ack, ApiError> {
        self.api
            .put(&format!("/domains/{domain}/mailboxes/{id}/password"), reset)
            .await
    }

    pub async fn logout_all(&self, domain: DomainId, id: MailboxId) -> Result<Ack, ApiError> {
        self.api
            .post_empty(&format!("/domains/{domain}/mailboxes/{id}/logout-all"))
            .await
    }

    pub async fn delete(&self, domain: DomainId, id: MailboxId) -> Result<Ack, ApiError> {
        self.api.delete(&format!("/domains/{domain}/mailboxes/{id}")).await
    }
}
