use mailpanel_core::PasswordChange;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::messages;
use crate::session::Credential;
use crate::transport::{Ack, ApiClient};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Credential,
}

/// `/auth/*` and `/me`.
pub struct AuthApi<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Exchange email and password for a credential. Does not touch the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, ApiError> {
        let body = LoginRequest {
            email: email.trim(),
            password,
        };
        // No session is held yet, so a 401 here means bad credentials.
        let resp: LoginResponse = self
            .api
            .post("/auth/login", &body)
            .await
            .map_err(|e| match e {
                ApiError::Unauthenticated => ApiError::Validation {
                    message: Some(messages::LOGIN_FAILED.to_string()),
                },
                other => other,
            })?;
        Ok(resp.token)
    }

    pub async fn logout(&self) -> Result<Ack, ApiError> {
        self.api.post_empty("/auth/logout").await
    }

    /// Invalidate every session of the caller, this one included.
    pub async fn logout_all(&self) -> Result<Ack, ApiError> {
        self.api.post_empty("/auth/logout-all").await
    }

    /// Raw profile payload; classification happens in the resolver.
    pub async fn me(&self) -> Result<Value, ApiError> {
        self.api.get("/me").await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<Ack, ApiError> {
        self.api.put("/me/password", change).await
    }
}
