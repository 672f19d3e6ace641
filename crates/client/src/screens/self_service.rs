use mailpanel_auth::Permission;
use mailpanel_core::{Autoresponder, AutoresponderDraft, PasswordChange};

use crate::confirm::{Confirmer, DestructiveAction, Outcome, confirm_then};
use crate::error::ApiError;
use crate::loader::{LoadState, Loader, Mount};
use crate::messages;
use crate::scoped::ScopedLoaders;
use crate::transport::{Ack, ApiClient};

/// What the autoresponder tab offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoresponderAffordance {
    /// Nothing loaded yet.
    Unknown,
    /// None configured.
    Create,
    UpdateOrDelete,
}

/// The mailbox owner's own password, footer and autoresponder.
pub struct SelfService {
    api: ApiClient,
    mount: Mount,
    footer: Loader<Option<String>>,
    autoresponder: Loader<Option<Autoresponder>>,
}

impl SelfService {
    pub fn new(api: ApiClient) -> Self {
        let mount = Mount::new();
        Self {
            api,
            footer: Loader::new(mount.clone()),
            autoresponder: Loader::new(mount.clone()),
            mount,
        }
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    pub fn footer(&self) -> LoadState<Option<String>> {
        self.footer.snapshot()
    }

    pub fn autoresponder(&self) -> LoadState<Option<Autoresponder>> {
        self.autoresponder.snapshot()
    }

    pub fn affordance(&self) -> AutoresponderAffordance {
        let state = self.autoresponder.snapshot();
        match (state.loaded, state.data) {
            (false, _) => AutoresponderAffordance::Unknown,
            (true, None) => AutoresponderAffordance::Create,
            (true, Some(_)) => AutoresponderAffordance::UpdateOrDelete,
        }
    }

    pub async fn load_footer(&self) -> Result<(), ApiError> {
        let scoped = ScopedLoaders::new(&self.api);
        self.footer.load(messages::LOAD_FOOTER, scoped.footer()).await
    }

    pub async fn load_autoresponder(&self) -> Result<(), ApiError> {
        let scoped = ScopedLoaders::new(&self.api);
        self.autoresponder
            .load(messages::LOAD_AUTORESPONDER, scoped.autoresponder())
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<Ack, ApiError> {
        self.api.require(Permission::OwnPassword)?;
        self.api.auth().change_password(change).await
    }

    /// Blank text clears the footer.
    pub async fn save_footer(&self, text: Option<&str>) -> Result<Ack, ApiError> {
        self.api.require(Permission::OwnFooter)?;
        let ack = self.api.profile().set_footer(text).await?;
        let _ = self.load_footer().await;
        Ok(ack)
    }

    pub async fn save_autoresponder(&self, draft: &AutoresponderDraft) -> Result<Ack, ApiError> {
        self.api.require(Permission::OwnAutoresponder)?;
        let ack = self.api.profile().save_autoresponder(draft).await?;
        let _ = self.load_autoresponder().await;
        Ok(ack)
    }

    pub async fn delete_autoresponder(
        &self,
        confirmer: &dyn Confirmer,
    ) -> Result<Outcome<Ack>, ApiError> {
        self.api.require(Permission::OwnAutoresponder)?;
        let profile = self.api.profile();
        let outcome = confirm_then(confirmer, DestructiveAction::DeleteAutoresponder, || {
            profile.delete_autoresponder()
        })
        .await?;
        if outcome.is_completed() {
            let _ = self.load_autoresponder().await;
        }
        Ok(outcome)
    }
}
