//! Operator-facing fallback messages.

pub const GENERIC: &str = "Something went wrong. Please try again.";
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
pub const NOT_PERMITTED: &str = "You do not have access to this resource.";

pub const LOGIN_FAILED: &str = "Invalid email or password";
pub const LOAD_USERS: &str = "Failed to load users";
pub const SAVE_USER: &str = "Failed to save user";
pub const LOAD_DOMAINS: &str = "Failed to load domains";
pub const SAVE_DOMAIN: &str = "Failed to save domain";
pub const DELETE_DOMAIN: &str = "Failed to delete domain";
pub const LOAD_MANAGERS: &str = "Failed to load managers";
pub const ASSIGN_MANAGER: &str = "Failed to assign manager";
pub const UNASSIGN_MANAGER: &str = "Failed to remove manager";
pub const LOAD_MAILBOXES: &str = "Failed to load mailboxes";
pub const SAVE_MAILBOX: &str = "Failed to save mailbox";
pub const DELETE_MAILBOX: &str = "Failed to delete mailbox";
pub const LOAD_ALIASES: &str = "Failed to load aliases";
pub const SAVE_ALIAS: &str = "Failed to save alias";
pub const DELETE_ALIAS: &str = "Failed to delete alias";
pub const LOAD_LOGS: &str = "Failed to load audit logs";
pub const LOAD_FOOTER: &str = "Failed to load footer";
pub const SAVE_FOOTER: &str = "Failed to save footer";
pub const LOAD_AUTORESPONDER: &str = "Failed to load autoresponder";
pub const SAVE_AUTORESPONDER: &str = "Failed to save autoresponder";
pub const DELETE_AUTORESPONDER: &str = "Failed to delete autoresponder";
pub const CHANGE_PASSWORD: &str = "Failed to change password";
pub const LOGOUT_ALL: &str = "Failed to log out all sessions";
