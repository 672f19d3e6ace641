use serde::{Deserialize, Serialize};

/// The three identity variants the console distinguishes.
///
/// The wire literal of a domain manager is `user`; mailbox owners carry no
/// role on the wire at all, so `mailbox` only exists after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "administrator")]
    Administrator,
    #[serde(rename = "user")]
    Manager,
    #[serde(rename = "mailbox")]
    Mailbox,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Administrator, Role::Manager, Role::Mailbox];

    /// Wire literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Manager => "user",
            Role::Mailbox => "mailbox",
        }
    }

    /// Human label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Manager => "Domain manager",
            Role::Mailbox => "Mailbox",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<mailpanel_core::UserRole> for Role {
    fn from(value: mailpanel_core::UserRole) -> Self {
        match value {
            mailpanel_core::UserRole::Administrator => Role::Administrator,
            mailpanel_core::UserRole::User => Role::Manager,
        }
    }
}
