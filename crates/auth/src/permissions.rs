use serde::Serialize;

/// A single action the console can gate.
///
/// The API enforces the same rules server-side; these exist so forbidden
/// controls are never offered in the first place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    UsersRead,
    /// Create/update users, reset their passwords, force their logout.
    UsersWrite,
    DomainsListAll,
    DomainsListAssigned,
    DomainsCreate,
    DomainsUpdate,
    DomainsDelete,
    ManagersRead,
    ManagersAssign,
    MailboxesRead,
    /// Create/update/delete mailboxes, reset passwords, force logout.
    MailboxesWrite,
    AliasesRead,
    AliasesWrite,
    AuditLogsGlobal,
    AuditLogsDomain,
    OwnPassword,
    OwnFooter,
    OwnAutoresponder,
    OwnSessionsLogoutAll,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::UsersRead => "users.read",
            Permission::UsersWrite => "users.write",
            Permission::DomainsListAll => "domains.list_all",
            Permission::DomainsListAssigned => "domains.list_assigned",
            Permission::DomainsCreate => "domains.create",
            Permission::DomainsUpdate => "domains.update",
            Permission::DomainsDelete => "domains.delete",
            Permission::ManagersRead => "managers.read",
            Permission::ManagersAssign => "managers.assign",
            Permission::MailboxesRead => "mailboxes.read",
            Permission::MailboxesWrite => "mailboxes.write",
            Permission::AliasesRead => "aliases.read",
            Permission::AliasesWrite => "aliases.write",
            Permission::AuditLogsGlobal => "audit_logs.global",
            Permission::AuditLogsDomain => "audit_logs.domain",
            Permission::OwnPassword => "self.password",
            Permission::OwnFooter => "self.footer",
            Permission::OwnAutoresponder => "self.autoresponder",
            Permission::OwnSessionsLogoutAll => "self.logout_all",
        }
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
