use mailpanel_auth::{Permission, Screen};
use mailpanel_core::{
    Alias, CreateAlias, CreateMailbox, Domain, Mailbox, PasswordReset, UpdateAlias, UpdateMailbox,
    User, UserId,
};

use crate::assignment::ManagerAssignments;
use crate::confirm::{Confirmer, DestructiveAction, Outcome, confirm_then};
use crate::error::ApiError;
use crate::loader::{ListState, Loader, Mount};
use crate::messages;
use crate::scoped::ScopedLoaders;
use crate::screens::audit::AuditFeed;
use crate::transport::{Ack, ApiClient};

/// One domain with its Managers, Aliases, Mailboxes and Logs tabs.
pub struct DomainDetail {
    api: ApiClient,
    domain: Domain,
    mount: Mount,
    managers: Loader<Vec<User>>,
    mailboxes: Loader<Vec<Mailbox>>,
    aliases: Loader<Vec<Alias>>,
    logs: AuditFeed,
}

impl DomainDetail {
    pub fn new(api: ApiClient, domain: Domain) -> Self {
        let mount = Mount::new();
        Self {
            logs: AuditFeed::with_mount(api.clone(), Some(domain.id), mount.clone()),
            managers: Loader::new(mount.clone()),
            mailboxes: Loader::new(mount.clone()),
            aliases: Loader::new(mount.clone()),
            mount,
            domain,
            api,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Visible tabs for the current identity; hidden ones are absent.
    pub fn tabs(&self) -> Vec<Screen> {
        self.api.capabilities().domain_tabs()
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    pub fn managers(&self) -> ListState<User> {
        self.managers.snapshot()
    }

    pub fn mailboxes(&self) -> ListState<Mailbox> {
        self.mailboxes.snapshot()
    }

    pub fn aliases(&self) -> ListState<Alias> {
        self.aliases.snapshot()
    }

    pub fn logs(&self) -> &AuditFeed {
        &self.logs
    }

    /// Full address of a mailbox in this domain.
    pub fn address_of(&self, mailbox: &Mailbox) -> String {
        mailbox.address(&self.domain.name)
    }

    pub async fn load_managers(&self) -> Result<(), ApiError> {
        let scoped = ScopedLoaders::new(&self.api);
        self.managers
            .load(messages::LOAD_MANAGERS, scoped.managers(self.domain.id))
            .await
    }

    pub async fn load_mailboxes(&self) -> Result<(), ApiError> {
        let scoped = ScopedLoaders::new(&self.api);
        self.mailboxes
            .load(messages::LOAD_MAILBOXES, scoped.mailboxes(self.domain.id))
            .await
    }

    pub async fn load_aliases(&self) -> Result<(), ApiError> {
        let scoped = ScopedLoaders::new(&self.api);
        self.aliases
            .load(messages::LOAD_ALIASES, scoped.aliases(self.domain.id))
            .await
    }

    // Managers

    pub async fn manager_candidates(&self) -> Result<Vec<User>, ApiError> {
        ManagerAssignments::new(&self.api).candidates(self.domain.id).await
    }

    pub async fn assign_manager(&self, user: UserId) -> Result<Ack, ApiError> {
        let ack = ManagerAssignments::new(&self.api).assign(user, self.domain.id).await?;
        let _ = self.load_managers().await;
        Ok(ack)
    }

    pub async fn unassign_manager(
        &self,
        confirmer: &dyn Confirmer,
        manager: &User,
    ) -> Result<Outcome<Ack>, ApiError> {
        let outcome = ManagerAssignments::new(&self.api)
            .unassign(confirmer, manager, &self.domain)
            .await?;
        if outcome.is_completed() {
            let _ = self.load_managers().await;
        }
        Ok(outcome)
    }

    // Mailboxes

    pub async fn create_mailbox(&self, cmd: &CreateMailbox) -> Result<Mailbox, ApiError> {
        self.api.require(Permission::MailboxesWrite)?;
        let mailbox = self.api.mailboxes().create(self.domain.id, cmd).await?;
        let _ = self.load_mailboxes().await;
        Ok(mailbox)
    }

    pub async fn update_mailbox(
        &self,
        mailbox: &Mailbox,
        cmd: &UpdateMailbox,
    ) -> Result<Mailbox, ApiError> {
        self.api.require(Permission::MailboxesWrite)?;
        let updated = self.api.mailboxes().update(self.domain.id, mailbox.id, cmd).await?;
        let _ = self.load_mailboxes().await;
        Ok(updated)
    }

    pub async fn reset_mailbox_password(
        &self,
        mailbox: &Mailbox,
        reset: &PasswordReset,
    ) -> Result<Ack, ApiError> {
        self.api.require(Permission::MailboxesWrite)?;
        self.api
            .mailboxes()
            .reset_password(self.domain.id, mailbox.id, reset)
            .await
    }

    pub async fn logout_all_mailbox(
        &self,
        confirmer: &dyn Confirmer,
        mailbox: &Mailbox,
    ) -> Result<Outcome<Ack>, ApiError> {
        self.api.require(Permission::MailboxesWrite)?;
        let action = DestructiveAction::LogoutAllMailbox {
            address: self.address_of(mailbox),
        };
        let mailboxes = self.api.mailboxes();
        confirm_then(confirmer, action, || mailboxes.logout_all(self.domain.id, mailbox.id)).await
    }

    pub async fn delete_mailbox(
        &self,
        confirmer: &dyn Confirmer,
        mailbox: &Mailbox,
    ) -> Result<Outcome<Ack>, ApiError> {
        self.api.require(Permission::MailboxesWrite)?;
        let action = DestructiveAction::DeleteMailbox {
            address: self.address_of(mailbox),
        };
        let mailboxes = self.api.mailboxes();
        let outcome = confirm_then(confirmer, action, || {
            mailboxes.delete(self.domain.id, mailbox.id)
        })
        .await?;
        if outcome.is_completed() {
            let _ = self.load_mailboxes().await;
        }
        Ok(outcome)
    }

    // Aliases

    pub async fn create_alias(&self, cmd: &CreateAlias) -> Result<Alias, ApiError> {
        self.api.require(Permission::AliasesWrite)?;
        let alias = self.api.aliases().create(self.domain.id, cmd).await?;
        let _ = self.load_aliases().await;
        Ok(alias)
    }

    pub async fn update_alias(&self, alias: &Alias, cmd: &UpdateAlias) -> Result<Alias, ApiError> {
        self.api.require(Permission::AliasesWrite)?;
        let updated = self.api.aliases().update(self.domain.id, alias.id, cmd).await?;
        let _ = self.load_aliases().await;
        Ok(updated)
    }

    pub async fn delete_alias(
        &self,
        confirmer: &dyn Confirmer,
        alias: &Alias,
    ) -> Result<Outcome<Ack>, ApiError> {
        self.api.require(Permission::AliasesWrite)?;
        let action = DestructiveAction::DeleteAlias {
            address: alias.full_address().to_string(),
        };
        let aliases = self.api.aliases();
        let outcome =
            confirm_then(confirmer, action, || aliases.delete(self.domain.id, alias.id)).await?;
        if outcome.is_completed() {
            let _ = self.load_aliases().await;
        }
        Ok(outcome)
    }
}
