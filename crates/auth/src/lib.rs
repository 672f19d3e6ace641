//! `mailpanel-auth`: who is signed in, and what they may see and do.
//!
//! This crate is intentionally decoupled from HTTP and storage: it classifies
//! identity payloads and maps identities to capabilities, nothing more.

pub mod authorize;
pub mod identity;
pub mod permissions;
pub mod role;

pub use authorize::{
    AuthzError, Capabilities, DomainScope, Explanation, Screen, TopLevelView, authorize, explain,
};
pub use identity::{Identity, IdentityError, MailboxIdentity, StaffIdentity};
pub use permissions::Permission;
pub use role::Role;
