//! `mailpanel-client`
//!
//! **Responsibility:** the console runtime around the mail-hosting API.
//!
//! This crate provides:
//! - A session object holding the bearer credential, with persistence
//! - An HTTP transport that treats every 401 as "session invalid"
//! - Typed services for each API resource
//! - Identity resolution and capability-scoped loaders
//! - A confirm-then-act protocol for destructive actions
//! - Screen state (list/create/edit/delete) and top-level view composition
//!
//! The client is a **thin shell** around the API: it owns no entity state
//! beyond what the current screen is displaying.

pub mod assignment;
pub mod config;
pub mod confirm;
pub mod console;
pub mod error;
pub mod loader;
pub mod messages;
pub mod resolver;
pub mod scoped;
pub mod screens;
pub mod services;
pub mod session;
pub mod transport;

pub use assignment::ManagerAssignments;
pub use config::{ClientConfig, ConfigError};
pub use confirm::{Confirmer, Decision, DestructiveAction, FixedDecision, Outcome, confirm_then};
pub use console::{Console, ConsoleView};
pub use error::{ApiError, ErrorKind};
pub use loader::{ListState, LoadState, Loader, Mount};
pub use resolver::{IdentityResolver, Resolution};
pub use scoped::ScopedLoaders;
pub use screens::{
    AuditFeed, AutoresponderAffordance, DomainDetail, DomainsScreen, SelfService, UsersScreen,
};
pub use session::{
    Credential, FileTokenStore, MemoryTokenStore, Session, SessionEnd, SessionError, TokenStore,
};
pub use transport::{Ack, ApiClient};
