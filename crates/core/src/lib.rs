//! `mailpanel-core`: entity types and request payloads of the mail-hosting API.
//!
//! Everything here is a transient copy of remote state. The API is the system
//! of record; this crate only describes shapes and the cheap input checks the
//! console performs before a request leaves the process.

pub mod alias;
pub mod audit;
pub mod autoresponder;
pub mod domain;
pub mod entity;
pub mod error;
pub mod id;
pub mod mailbox;
pub mod password;
pub mod timestamp;
pub mod user;

pub use alias::{Alias, CreateAlias, UpdateAlias};
pub use audit::{
    ActorType, AuditLogEntry, AuditLogPage, AuditStatus, EventSeverity, EventType, Pagination,
};
pub use autoresponder::{Autoresponder, AutoresponderDraft};
pub use domain::{CreateDomain, Domain, UpdateDomain};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AliasId, AuditLogId, DomainId, MailboxId, UserId};
pub use mailbox::{CreateMailbox, Mailbox, UpdateMailbox};
pub use password::{MIN_PASSWORD_LEN, PasswordChange, PasswordReset};
pub use user::{CreateUser, UpdateUser, User, UserRole};
