//! Editing the domain ↔ manager relation.

use std::collections::HashSet;

use mailpanel_auth::Permission;
use mailpanel_core::{Domain, DomainId, Entity, User, UserId};
use tracing::debug;

use crate::confirm::{Confirmer, DestructiveAction, Outcome, confirm_then};
use crate::error::ApiError;
use crate::transport::{Ack, ApiClient};

pub struct ManagerAssignments<'a> {
    api: &'a ApiClient,
}

impl<'a> ManagerAssignments<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Users that can still be assigned to `domain`.
    ///
    /// Users and current managers are fetched concurrently. Filtering is a
    /// convenience; the server rejects duplicate pairs on its own.
    pub async fn candidates(&self, domain: DomainId) -> Result<Vec<User>, ApiError> {
        self.api.require(Permission::ManagersAssign)?;
        let users_api = self.api.users();
        let domains_api = self.api.domains();
        let (users, managers) = tokio::try_join!(users_api.list(), domains_api.managers(domain))?;

        let assigned: HashSet<UserId> = managers.iter().map(Entity::id).collect();
        let candidates: Vec<User> = users
            .into_iter()
            .filter(|u| !assigned.contains(&u.id()))
            .collect();
        debug!(%domain, candidates = candidates.len(), "manager candidates");
        Ok(candidates)
    }

    pub async fn assign(&self, user: UserId, domain: DomainId) -> Result<Ack, ApiError> {
        self.api.require(Permission::ManagersAssign)?;
        self.api.users().assign_domain(user, domain).await
    }

    /// Remove one pair, after confirmation.
    pub async fn unassign(
        &self,
        confirmer: &dyn Confirmer,
        manager: &User,
        domain: &Domain,
    ) -> Result<Outcome<Ack>, ApiError> {
        self.api.require(Permission::ManagersAssign)?;
        let action = DestructiveAction::UnassignManager {
            manager: manager.email.clone(),
            domain: domain.name.clone(),
        };
        let users = self.api.users();
        confirm_then(confirmer, action, || users.unassign_domain(manager.id, domain.id)).await
    }
}
