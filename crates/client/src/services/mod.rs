//! Typed access to each API resource.
//!
//! Services are thin borrowed views over [`ApiClient`]: they shape paths and
//! envelopes and run the cheap input checks. Policy lives in the callers.

pub mod aliases;
pub mod audit_logs;
pub mod auth;
pub mod domains;
pub mod mailboxes;
pub mod profile;
pub mod users;

pub use aliases::AliasesApi;
pub use audit_logs::AuditLogsApi;
pub use auth::AuthApi;
pub use domains::DomainsApi;
pub use mailboxes::MailboxesApi;
pub use profile::ProfileApi;
pub use users::UsersApi;

use crate::transport::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn domains(&self) -> DomainsApi<'_> {
        DomainsApi::new(self)
    }

    pub fn mailboxes(&self) -> MailboxesApi<'_> {
        MailboxesApi::new(self)
    }

    pub fn aliases(&self) -> AliasesApi<'_> {
        AliasesApi::new(self)
    }

    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(self)
    }

    pub fn audit_logs(&self) -> AuditLogsApi<'_> {
        AuditLogsApi::new(self)
    }
}
