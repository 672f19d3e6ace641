//! Turns the held credential into an identity, or into "signed out".

use mailpanel_auth::Identity;
use tracing::{debug, warn};

use crate::session::SessionEnd;
use crate::transport::ApiClient;

/// Outcome of [`IdentityResolver::resolve`]. There is no partial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Authenticated(Identity),
    Unauthenticated,
}

impl Resolution {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Resolution::Authenticated(identity) => Some(identity),
            Resolution::Unauthenticated => None,
        }
    }
}

pub struct IdentityResolver<'a> {
    api: &'a ApiClient,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Resolve the current credential with a single `/me` call.
    ///
    /// Without a credential no request is made. Any failure discards the
    /// credential. Safe to call repeatedly.
    pub async fn resolve(&self) -> Resolution {
        let session = self.api.session();
        let Some(credential) = session.credential() else {
            debug!("no credential held; skipping identity resolution");
            return Resolution::Unauthenticated;
        };

        let classified = match self.api.auth().me().await {
            Ok(payload) => Identity::classify(payload).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match classified {
            Ok(identity) => {
                if session.establish(&credential, identity.clone()) {
                    debug!(role = %identity.role(), "identity resolved");
                    Resolution::Authenticated(identity)
                } else {
                    Resolution::Unauthenticated
                }
            }
            Err(reason) => {
                warn!(%reason, "identity resolution failed");
                // Only the credential we resolved is discarded.
                session.end_if_current(&credential, SessionEnd::ResolutionFailed);
                Resolution::Unauthenticated
            }
        }
    }
}
