//! Top-level view composition.
//!
//! Exactly one view renders at a time and it is derived from the session on
//! every call to [`Console::view`], so logout and expiry take effect on the
//! next render without any bookkeeping.

use mailpanel_auth::{Capabilities, Identity, MailboxIdentity, Permission, Screen};
use tracing::{info, warn};

use crate::confirm::{Confirmer, DestructiveAction, Outcome, confirm_then};
use crate::error::ApiError;
use crate::resolver::{IdentityResolver, Resolution};
use crate::session::{Credential, SessionEnd, SessionError};
use crate::transport::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleView {
    CredentialEntry,
    Management { identity: Identity, tabs: Vec<Screen> },
    SelfService { identity: MailboxIdentity, tabs: Vec<Screen> },
}

impl ConsoleView {
    pub fn tabs(&self) -> &[Screen] {
        match self {
            ConsoleView::CredentialEntry => &[],
            ConsoleView::Management { tabs, .. } | ConsoleView::SelfService { tabs, .. } => tabs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Console {
    api: ApiClient,
}

impl Console {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Start-up: restore a persisted credential (or take `seed`), then resolve it.
    pub async fn bootstrap(&self, seed: Option<Credential>) -> Result<ConsoleView, SessionError> {
        let session = self.api.session();
        match seed {
            Some(credential) => session.store_credential(credential)?,
            None => {
                session.restore()?;
            }
        }
        IdentityResolver::new(&self.api).resolve().await;
        Ok(self.view())
    }

    /// Sign in and resolve the identity behind the new credential.
    pub async fn login(&self, email: &str, password: &str) -> Result<ConsoleView, ApiError> {
        let credential = self.api.auth().login(email, password).await?;
        if let Err(e) = self.api.session().store_credential(credential) {
            warn!(error = %e, "credential could not be persisted; keeping it for this run only");
        }
        match IdentityResolver::new(&self.api).resolve().await {
            Resolution::Authenticated(identity) => {
                info!(role = %identity.role(), "signed in");
                Ok(self.view())
            }
            Resolution::Unauthenticated => Err(ApiError::Unauthenticated),
        }
    }

    /// Sign out. Local state is cleared even when the API call fails.
    pub async fn logout(&self) -> ConsoleView {
        if self.api.session().is_authenticated() {
            if let Err(e) = self.api.auth().logout().await {
                warn!(error = %e, "logout request failed; clearing local session anyway");
            }
        }
        self.api.session().end(SessionEnd::Logout);
        self.view()
    }

    /// End every session of the caller, after confirmation.
    pub async fn logout_all(
        &self,
        confirmer: &dyn Confirmer,
    ) -> Result<Outcome<ConsoleView>, ApiError> {
        self.api.require(Permission::OwnSessionsLogoutAll)?;
        let auth = self.api.auth();
        let outcome = confirm_then(confirmer, DestructiveAction::LogoutAllOwnSessions, || {
            auth.logout_all()
        })
        .await?;
        Ok(match outcome {
            Outcome::Completed(_) => {
                self.api.session().end(SessionEnd::Logout);
                Outcome::Completed(self.view())
            }
            Outcome::Abandoned => Outcome::Abandoned,
        })
    }

    /// The view for the current session, derived fresh.
    pub fn view(&self) -> ConsoleView {
        let identity = self.api.session().identity();
        let tabs = Capabilities::for_identity(identity.as_ref()).tabs();
        match identity {
            None => ConsoleView::CredentialEntry,
            Some(identity @ (Identity::Administrator(_) | Identity::Manager(_))) => {
                ConsoleView::Management { identity, tabs }
            }
            Some(Identity::Mailbox(identity)) => ConsoleView::SelfService { identity, tabs },
        }
    }
}
