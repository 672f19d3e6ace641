//! Loaders that apply the caller's scope on their own.
//!
//! Callers never pass a scope: it comes from the current identity. The
//! client-side check only avoids requests that cannot succeed; the server
//! stays the authority, and its 403 is returned as a terminal failure.

use mailpanel_auth::{DomainScope, Permission};
use mailpanel_core::{Alias, AuditLogPage, Autoresponder, Domain, DomainId, Mailbox, User};

use crate::error::ApiError;
use crate::transport::ApiClient;

pub struct ScopedLoaders<'a> {
    api: &'a ApiClient,
}

impl<'a> ScopedLoaders<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// All domains for an administrator, assigned ones for a manager.
    pub async fn domains(&self) -> Result<Vec<Domain>, ApiError> {
        match self.api.capabilities().domain_scope() {
            DomainScope::All => self.api.domains().list_all().await,
            DomainScope::Assigned(_) => self.api.domains().list_mine().await,
            DomainScope::Unavailable => {
                self.api.require(Permission::DomainsListAssigned)?;
                // Policy grants the permission but no scope: treat as refused.
                Err(ApiError::Forbidden { message: None })
            }
        }
    }

    pub async fn mailboxes(&self, domain: DomainId) -> Result<Vec<Mailbox>, ApiError> {
        self.api.require(Permission::MailboxesRead)?;
        self.api.mailboxes().list(domain).await
    }

    pub async fn aliases(&self, domain: DomainId) -> Result<Vec<Alias>, ApiError> {
        self.api.require(Permission::AliasesRead)?;
        self.api.aliases().list(domain).await
    }

    pub async fn managers(&self, domain: DomainId) -> Result<Vec<User>, ApiError> {
        self.api.require(Permission::ManagersRead)?;
        self.api.domains().managers(domain).await
    }

    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.api.require(Permission::UsersRead)?;
        self.api.users().list().await
    }

    /// Global feed without a domain, domain feed with one.
    pub async fn audit_logs(
        &self,
        page: u32,
        domain: Option<DomainId>,
    ) -> Result<AuditLogPage, ApiError> {
        let permission = match domain {
            None => Permission::AuditLogsGlobal,
            Some(_) => Permission::AuditLogsDomain,
        };
        self.api.require(permission)?;
        self.api.audit_logs().page(page, domain).await
    }

    pub async fn footer(&self) -> Result<Option<String>, ApiError> {
        self.api.require(Permission::OwnFooter)?;
        self.api.profile().footer().await
    }

    pub async fn autoresponder(&self) -> Result<Option<Autoresponder>, ApiError> {
        self.api.require(Permission::OwnAutoresponder)?;
        self.api.profile().autoresponder().await
    }
}
