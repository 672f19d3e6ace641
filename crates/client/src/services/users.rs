use mailpanel_core::{CreateUser, DomainId, PasswordReset, UpdateUser, User, UserId};
use serde::Deserialize;

use crate::error::ApiError;
use crate::transport::{Ack, ApiClient};

#[derive(Deserialize)]
struct UserList {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

pub struct UsersApi<'a> {
    api: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let list: UserList = self.api.get("/users").await?;
        Ok(list.users)
    }

    /// `GET /users/:id` answers with the bare user or `{user}`.
    pub async fn get(&self, id: UserId) -> Result<User, ApiError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneUser {
            Wrapped(UserEnvelope),
            Bare(User),
        }
        let user: OneUser = self.api.get(&format!("/users/{id}")).await?;
        Ok(match user {
            OneUser::Wrapped(env) => env.user,
            OneUser::Bare(user) => user,
        })
    }

    pub async fn create(&self, cmd: &CreateUser) -> Result<User, ApiError> {
        cmd.validate()?;
        let env: UserEnvelope = self.api.post("/users", cmd).await?;
        Ok(env.user)
    }

    pub async fn update(&self, id: UserId, cmd: &UpdateUser) -> Result<User, ApiError> {
        cmd.validate()?;
        let env: UserEnvelope = self.api.put(&format!("/users/{id}"), cmd).await?;
        Ok(env.user)
    }

    pub async fn reset_password(&self, id: UserId, reset: &PasswordReset) -> Result<Ack, ApiError> {
        self.api.put(&format!("/users/{id}/password"), reset).await
    }

    pub async fn logout_all(&self, id: UserId) -> Result<Ack, ApiError> {
        self.api.post_empty(&format!("/users/{id}/logout-all")).await
    }

    pub async fn assign_domain(&self, id: UserId, domain: DomainId) -> Result<Ack, ApiError> {
        self.api.post_empty(&format!("/users/{id}/domains/{domain}")).await
    }

    pub async fn unassign_domain(&self, id: UserId, domain: DomainId) -> Result<Ack, ApiError> {
        self.api.delete(&format!("/users/{id}/domains/{domain}")).await
    }
}
