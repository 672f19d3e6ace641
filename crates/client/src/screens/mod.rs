//! State behind each console screen.
//!
//! A screen owns a [`Mount`](crate::loader::Mount) and one
//! [`Loader`](crate::loader::Loader) per resource it shows. Mutations reload
//! the affected list afterwards; nothing is patched locally.

pub mod audit;
pub mod domain_detail;
pub mod domains;
pub mod self_service;
pub mod users;

pub use audit::AuditFeed;
pub use domain_detail::DomainDetail;
pub use domains::DomainsScreen;
pub use self_service::{AutoresponderAffordance, SelfService};
pub use users::UsersScreen;
