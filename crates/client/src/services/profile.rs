//! Self-service resources of the signed-in mailbox. No ids: the server scopes
//! every call to the credential.

use mailpanel_core::{Autoresponder, AutoresponderDraft};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::{Ack, ApiClient};

#[derive(Deserialize)]
struct FooterResponse {
    #[serde(default)]
    footer_text: Option<String>,
}

#[derive(Serialize)]
struct FooterRequest<'a> {
    footer_text: Option<&'a str>,
}

#[derive(Deserialize)]
struct AutoresponderResponse {
    #[serde(default)]
    autoresponder: Option<Autoresponder>,
}

pub struct ProfileApi<'a> {
    api: &'a ApiClient,
}

impl<'a> ProfileApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn footer(&self) -> Result<Option<String>, ApiError> {
        let resp: FooterResponse = self.api.get("/mailbox/footer").await?;
        Ok(resp.footer_text.filter(|t| !t.is_empty()))
    }

    /// Blank text clears the footer (sent as `null`). The server answers with
    /// a message only; reload to see the stored text.
    pub async fn set_footer(&self, text: Option<&str>) -> Result<Ack, ApiError> {
        let footer_text = text.filter(|t| !t.trim().is_empty());
        self.api
            .put("/mailbox/footer", &FooterRequest { footer_text })
            .await
    }

    /// `None` when no autoresponder is configured.
    pub async fn autoresponder(&self) -> Result<Option<Autoresponder>, ApiError> {
        let resp: AutoresponderResponse = self.api.get("/mailbox/autoresponder").await?;
        Ok(resp.autoresponder)
    }

    /// Create or replace the autoresponder as a unit.
    pub async fn save_autoresponder(&self, draft: &AutoresponderDraft) -> Result<Ack, ApiError> {
        draft.validate()?;
        self.api.put("/mailbox/autoresponder", draft).await
    }

    pub async fn delete_autoresponder(&self) -> Result<Ack, ApiError> {
        self.api.delete("/mailbox/autoresponder").await
    }
}
