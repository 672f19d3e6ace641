use mailpanel_auth::Permission;
use mailpanel_core::{CreateDomain, Domain, DomainId, UpdateDomain};

use crate::confirm::{Confirmer, DestructiveAction, Outcome, confirm_then};
use crate::error::ApiError;
use crate::loader::{ListState, Loader, Mount};
use crate::messages;
use crate::scoped::ScopedLoaders;
use crate::transport::{Ack, ApiClient};

/// Domain list; scoped to the caller automatically.
pub struct DomainsScreen {
    api: ApiClient,
    domains: Loader<Vec<Domain>>,
}

impl DomainsScreen {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            domains: Loader::new(Mount::new()),
        }
    }

    pub fn state(&self) -> ListState<Domain> {
        self.domains.snapshot()
    }

    pub fn unmount(&self) {
        self.domains.mount().unmount();
    }

    /// Whether edit and delete controls exist at all.
    pub fn can_manage(&self) -> bool {
        self.api.capabilities().can(Permission::DomainsUpdate)
    }

    pub async fn load(&self) -> Result<(), ApiError> {
        let scoped = ScopedLoaders::new(&self.api);
        self.domains.load(messages::LOAD_DOMAINS, scoped.domains()).await
    }

    pub async fn create(&self, cmd: &CreateDomain) -> Result<Domain, ApiError> {
        self.api.require(Permission::DomainsCreate)?;
        let domain = self.api.domains().create(cmd).await?;
        let _ = self.load().await;
        Ok(domain)
    }

    pub async fn update(&self, id: DomainId, cmd: &UpdateDomain) -> Result<Domain, ApiError> {
        self.api.require(Permission::DomainsUpdate)?;
        let domain = self.api.domains().update(id, cmd).await?;
        let _ = self.load().await;
        Ok(domain)
    }

    pub async fn delete(
        &self,
        confirmer: &dyn Confirmer,
        domain: &Domain,
    ) -> Result<Outcome<Ack>, ApiError> {
        self.api.require(Permission::DomainsDelete)?;
        let action = DestructiveAction::DeleteDomain {
            domain: domain.name.clone(),
        };
        let domains = self.api.domains();
        let outcome = confirm_then(confirmer, action, || domains.delete(domain.id)).await?;
        if outcome.is_completed() {
            let _ = self.load().await;
        }
        Ok(outcome)
    }
}
