use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use mailpanel_core::UserId;

use crate::{Identity, Permission, Role};

/// The single top-level view rendered for a session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopLevelView {
    CredentialEntry,
    ManagementConsole,
    SelfService,
}

/// Screens and tabs the console can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Users,
    Domains,
    GlobalLogs,
    DomainManagers,
    DomainAliases,
    DomainMailboxes,
    DomainLogs,
    OwnPassword,
    OwnFooter,
    OwnAutoresponder,
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Users => "Users",
            Screen::Domains => "Domains",
            Screen::GlobalLogs => "Global logs",
            Screen::DomainManagers => "Managers",
            Screen::DomainAliases => "Aliases",
            Screen::DomainMailboxes => "Mailboxes",
            Screen::DomainLogs => "Logs",
            Screen::OwnPassword => "Password",
            Screen::OwnFooter => "Footer",
            Screen::OwnAutoresponder => "Autoresponder",
        }
    }
}

/// Which domains a list load may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainScope {
    /// Every domain (`GET /domains`).
    All,
    /// Domains assigned to this manager (`GET /me/domains`).
    Assigned(UserId),
    /// No domain list exists for this caller.
    Unavailable,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("forbidden: {role} lacks permission '{permission}'")]
    Forbidden { role: Role, permission: Permission },
}

/// Everything a caller may see and do, derived from their identity.
///
/// Cheap to build; callers re-derive it from the current identity whenever
/// they need it instead of keeping a copy around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    role: Option<Role>,
    user_id: Option<UserId>,
    permissions: BTreeSet<Permission>,
}

fn permissions_for(role: Role) -> &'static [Permission] {
    use Permission::*;
    match role {
        Role::Administrator => &[
            UsersRead,
            UsersWrite,
            DomainsListAll,
            DomainsCreate,
            DomainsUpdate,
            DomainsDelete,
            ManagersRead,
            ManagersAssign,
            MailboxesRead,
            MailboxesWrite,
            AliasesRead,
            AliasesWrite,
            AuditLogsGlobal,
            AuditLogsDomain,
            OwnPassword,
            OwnSessionsLogoutAll,
        ],
        Role::Manager => &[
            DomainsListAssigned,
            MailboxesRead,
            MailboxesWrite,
            AliasesRead,
            AliasesWrite,
            AuditLogsDomain,
            OwnPassword,
            OwnSessionsLogoutAll,
        ],
        Role::Mailbox => &[OwnPassword, OwnFooter, OwnAutoresponder, OwnSessionsLogoutAll],
    }
}

impl Capabilities {
    /// Capabilities of a (possibly absent) identity.
    pub fn for_identity(identity: Option<&Identity>) -> Self {
        match identity {
            None => Self {
                role: None,
                user_id: None,
                permissions: BTreeSet::new(),
            },
            Some(identity) => {
                let role = identity.role();
                Self {
                    role: Some(role),
                    user_id: identity.user_id(),
                    permissions: permissions_for(role).iter().copied().collect(),
                }
            }
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    pub fn permissions(&self) -> impl Iterator<Item = Permission> + '_ {
        self.permissions.iter().copied()
    }

    pub fn view(&self) -> TopLevelView {
        match self.role {
            None => TopLevelView::CredentialEntry,
            Some(Role::Administrator | Role::Manager) => TopLevelView::ManagementConsole,
            Some(Role::Mailbox) => TopLevelView::SelfService,
        }
    }

    pub fn is_visible(&self, screen: Screen) -> bool {
        match screen {
            Screen::Users => self.can(Permission::UsersRead),
            Screen::Domains => {
                self.can(Permission::DomainsListAll) || self.can(Permission::DomainsListAssigned)
            }
            Screen::GlobalLogs => self.can(Permission::AuditLogsGlobal),
            Screen::DomainManagers => self.can(Permission::ManagersRead),
            Screen::DomainAliases => self.can(Permission::AliasesRead),
            Screen::DomainMailboxes => self.can(Permission::MailboxesRead),
            Screen::DomainLogs => self.can(Permission::AuditLogsDomain),
            Screen::OwnPassword => {
                self.view() == TopLevelView::SelfService && self.can(Permission::OwnPassword)
            }
            Screen::OwnFooter => self.can(Permission::OwnFooter),
            Screen::OwnAutoresponder => self.can(Permission::OwnAutoresponder),
        }
    }

    /// Top-level tabs, in display order. Hidden tabs are absent, not disabled.
    pub fn tabs(&self) -> Vec<Screen> {
        let candidates: &[Screen] = match self.view() {
            TopLevelView::CredentialEntry => &[],
            TopLevelView::ManagementConsole => {
                &[Screen::Users, Screen::Domains, Screen::GlobalLogs]
            }
            TopLevelView::SelfService => {
                &[Screen::OwnPassword, Screen::OwnFooter, Screen::OwnAutoresponder]
            }
        };
        candidates.iter().copied().filter(|s| self.is_visible(*s)).collect()
    }

    /// Tabs of the domain detail screen, in display order.
    pub fn domain_tabs(&self) -> Vec<Screen> {
        [
            Screen::DomainManagers,
            Screen::DomainAliases,
            Screen::DomainMailboxes,
            Screen::DomainLogs,
        ]
        .into_iter()
        .filter(|s| self.is_visible(*s))
        .collect()
    }

    pub fn domain_scope(&self) -> DomainScope {
        match (self.role, self.user_id) {
            (Some(Role::Administrator), _) => DomainScope::All,
            (Some(Role::Manager), Some(id)) => DomainScope::Assigned(id),
            (Some(Role::Manager), None) | (Some(Role::Mailbox), _) | (None, _) => {
                DomainScope::Unavailable
            }
        }
    }
}

/// Check a single permission.
///
/// - No IO
/// - No panics
pub fn authorize(capabilities: &Capabilities, required: Permission) -> Result<(), AuthzError> {
    let Some(role) = capabilities.role else {
        return Err(AuthzError::Unauthenticated);
    };
    if capabilities.can(required) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden {
            role,
            permission: required,
        })
    }
}

/// Why a permission check came out the way it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub required_permission: Permission,
    pub granted: bool,
    pub role: Option<Role>,
    pub reason: String,
    /// Roles that would be granted the permission.
    pub granting_roles: Vec<Role>,
}

/// Explain an authorization decision in operator-facing terms.
pub fn explain(capabilities: &Capabilities, required: Permission) -> Explanation {
    let granting_roles: Vec<Role> = Role::ALL
        .into_iter()
        .filter(|r| permissions_for(*r).contains(&required))
        .collect();

    let (granted, reason) = match authorize(capabilities, required) {
        Ok(()) => (
            true,
            format!(
                "{} is granted '{}'",
                capabilities.role.map(|r| r.label()).unwrap_or("caller"),
                required
            ),
        ),
        Err(AuthzError::Unauthenticated) => (false, "sign in first".to_string()),
        Err(AuthzError::Forbidden { role, .. }) => {
            let needed = granting_roles
                .iter()
                .map(|r| r.label())
                .collect::<Vec<_>>()
                .join(" or ");
            (
                false,
                format!("{} cannot do this; requires {}", role.label(), needed),
            )
        }
    };

    Explanation {
        required_permission: required,
        granted,
        role: capabilities.role,
        reason,
        granting_roles,
    }
}
