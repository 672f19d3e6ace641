//! Confirm-then-act protocol for destructive actions.
//!
//! The remote API has no undo. Every destructive call goes through
//! [`confirm_then`]: the operation is built only after a [`Confirmer`] says
//! yes, so a declined action issues no request.

use std::future::Future;

use async_trait::async_trait;
use tracing::info;

use crate::error::ApiError;

/// Actions that need an explicit human yes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestructiveAction {
    DeleteDomain { domain: String },
    DeleteMailbox { address: String },
    DeleteAlias { address: String },
    DeleteAutoresponder,
    UnassignManager { manager: String, domain: String },
    LogoutAllUser { email: String },
    LogoutAllMailbox { address: String },
    LogoutAllOwnSessions,
}

impl DestructiveAction {
    /// Question put to the operator.
    pub fn prompt(&self) -> String {
        match self {
            DestructiveAction::DeleteDomain { domain } => format!(
                "Delete domain \"{domain}\"? All of its mailboxes and aliases will be removed."
            ),
            DestructiveAction::DeleteMailbox { address } => format!("Delete mailbox {address}?"),
            DestructiveAction::DeleteAlias { address } => format!("Delete alias {address}?"),
            DestructiveAction::DeleteAutoresponder => "Delete the autoresponder?".to_string(),
            DestructiveAction::UnassignManager { manager, domain } => {
                format!("Remove {manager} as a manager of {domain}?")
            }
            DestructiveAction::LogoutAllUser { email } => {
                format!("Log out all sessions of {email}?")
            }
            DestructiveAction::LogoutAllMailbox { address } => {
                format!("Log out all sessions of {address}?")
            }
            DestructiveAction::LogoutAllOwnSessions => {
                "Log out all of your sessions, including this one?".to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Declined,
}

/// Source of the operator's decision (a prompt, a `--yes` flag, a test).
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn decide(&self, action: &DestructiveAction) -> Decision;
}

/// Always answers the same way.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub Decision);

#[async_trait]
impl Confirmer for FixedDecision {
    async fn decide(&self, _action: &DestructiveAction) -> Decision {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    /// Declined; nothing was sent.
    Abandoned,
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(v) => Some(v),
            Outcome::Abandoned => None,
        }
    }
}

/// Ask first, then build and run `op` only on [`Decision::Confirmed`].
pub async fn confirm_then<T, F, Fut>(
    confirmer: &dyn Confirmer,
    action: DestructiveAction,
    op: F,
) -> Result<Outcome<T>, ApiError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    match confirmer.decide(&action).await {
        Decision::Confirmed => op().await.map(Outcome::Completed),
        Decision::Declined => {
            info!(?action, "destructive action declined");
            Ok(Outcome::Abandoned)
        }
    }
}
