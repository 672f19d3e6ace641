use mailpanel_auth::Permission;
use mailpanel_core::{CreateUser, PasswordReset, UpdateUser, User, UserId};

use crate::confirm::{Confirmer, DestructiveAction, Outcome, confirm_then};
use crate::error::ApiError;
use crate::loader::{ListState, Loader, Mount};
use crate::messages;
use crate::scoped::ScopedLoaders;
use crate::transport::{Ack, ApiClient};

/// Administrator-only user management.
pub struct UsersScreen {
    api: ApiClient,
    users: Loader<Vec<User>>,
}

impl UsersScreen {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            users: Loader::new(Mount::new()),
        }
    }

    pub fn state(&self) -> ListState<User> {
        self.users.snapshot()
    }

    pub fn unmount(&self) {
        self.users.mount().unmount();
    }

    pub async fn load(&self) -> Result<(), ApiError> {
        let scoped = ScopedLoaders::new(&self.api);
        self.users.load(messages::LOAD_USERS, scoped.users()).await
    }

    pub async fn create(&self, cmd: &CreateUser) -> Result<User, ApiError> {
        self.api.require(Permission::UsersWrite)?;
        let user = self.api.users().create(cmd).await?;
        self.reload().await;
        Ok(user)
    }

    pub async fn update(&self, id: UserId, cmd: &UpdateUser) -> Result<User, ApiError> {
        self.api.require(Permission::UsersWrite)?;
        let user = self.api.users().update(id, cmd).await?;
        self.reload().await;
        Ok(user)
    }

    pub async fn reset_password(&self, id: UserId, reset: &PasswordReset) -> Result<Ack, ApiError> {
        self.api.require(Permission::UsersWrite)?;
        self.api.users().reset_password(id, reset).await
    }

    pub async fn logout_all(
        &self,
        confirmer: &dyn Confirmer,
        user: &User,
    ) -> Result<Outcome<Ack>, ApiError> {
        self.api.require(Permission::UsersWrite)?;
        let action = DestructiveAction::LogoutAllUser {
            email: user.email.clone(),
        };
        let users = self.api.users();
        confirm_then(confirmer, action, || users.logout_all(user.id)).await
    }

    /// Reload after a mutation; a failure here is already in the state.
    async fn reload(&self) {
        let _ = self.load().await;
    }
}
