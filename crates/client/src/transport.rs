//! HTTP transport.
//!
//! Every request reads the session credential just before it is sent and
//! attaches it as a bearer token. A 401 from any endpoint expires the session
//! here, once, so no call site handles it on its own.

use mailpanel_auth::{Capabilities, Permission, authorize};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::Session;

/// Body of endpoints that only acknowledge (`{"message": "..."}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Capabilities of whoever is signed in right now.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_identity(self.session.identity().as_ref())
    }

    /// Local policy check before a request leaves the process.
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        authorize(&self.capabilities(), permission).map_err(ApiError::from)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, &[], None).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(Method::GET, path, query, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        self.send(Method::POST, path, &[], Some(body)).await
    }

    /// POST with no body (logout, assignment, force logout).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::POST, path, &[], None).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::DELETE, path, &[], None).await
    }

    /// Issue one request. No retry and no deduplication.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let credential = self.session.credential();

        let mut req = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(credential) = &credential {
            req = req.bearer_auth(credential.expose());
        }
        if let Some(body) = &body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "request failed");
            ApiError::Network(e.to_string())
        })?;
        let status = resp.status();
        debug!(%method, path, status = status.as_u16(), "response");

        let bytes = resp.bytes().await?;

        if status.is_success() {
            let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
                b"{}"
            } else {
                &bytes
            };
            return serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(e.to_string()));
        }

        if status.as_u16() == 401 {
            match &credential {
                Some(used) if self.session.expire(used) => {
                    warn!(%method, path, "credential rejected; session expired");
                }
                _ => debug!(%method, path, "401 without a current credential"),
            }
            return Err(ApiError::Unauthenticated);
        }

        Err(ApiError::from_status(status.as_u16(), error_message(&bytes)))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::Decode(format!("failed to encode request: {e}")))
}

/// The `error` field of a JSON error body, else its `message` field.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
