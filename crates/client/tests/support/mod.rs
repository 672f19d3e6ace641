//! In-process fake of the mail-hosting API.
//!
//! Same contract as the real service for the endpoints the console uses,
//! backed by a `Mutex`ed state so tests can seed data, revoke tokens, inject
//! failures and count requests.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use mailpanel_client::{ApiClient, ClientConfig, Console, Credential, Session};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const MANAGER_TOKEN: &str = "manager-token";
pub const MAILBOX_TOKEN: &str = "mailbox-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    Admin(i64),
    Manager(i64),
    Mailbox(i64),
}

#[derive(Default)]
pub struct FakeState {
    pub tokens: HashMap<String, Principal>,
    /// email -> (password, token)
    pub logins: HashMap<String, (String, String)>,
    /// token -> `/me` payload
    pub profiles: HashMap<String, Value>,
    pub users: Vec<Value>,
    pub domains: Vec<Value>,
    /// (user id, domain id)
    pub assignments: BTreeSet<(i64, i64)>,
    pub mailboxes: Vec<Value>,
    pub aliases: Vec<Value>,
    pub audit: Vec<Value>,
    pub footer: Option<String>,
    pub autoresponder: Option<Value>,
    /// path (without `/api`) -> status answered instead of the real handler
    pub failing: HashMap<String, u16>,
    /// `METHOD /path` of every request received, in order
    pub requests: Vec<String>,
    next_id: i64,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn domain_name(&self, id: i64) -> Option<String> {
        self.domains
            .iter()
            .find(|d| d["id"] == id)
            .and_then(|d| d["name"].as_str())
            .map(str::to_string)
    }
}

#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    /// Admin 1, manager 2 (assigned to domain 7 only), user 3; domains 7 and 9;
    /// mailbox 11 `jan` in domain 7 and mailbox 12 `eva` in domain 9.
    pub fn seeded() -> Self {
        let api = FakeApi::default();
        {
            let mut s = api.state();
            s.next_id = 100;
            s.users = vec![
                user(1, "root@example.com", "administrator"),
                user(2, "manager@example.com", "user"),
                user(3, "other@example.com", "user"),
            ];
            s.domains = vec![
                json!({
                    "id": 7, "name": "example.com", "active": true,
                    "created_at": "2025-01-01 10:00:00"
                }),
                json!({
                    "id": 9, "name": "other.org", "active": true,
                    "created_at": "2025-01-02 10:00:00"
                }),
            ];
            s.assignments.insert((2, 7));
            s.mailboxes = vec![
                json!({
                    "id": 11, "domain_id": 7, "name": "jan", "active": true,
                    "footer_text": null, "has_active_autoresponder": false
                }),
                json!({
                    "id": 12, "domain_id": 9, "name": "eva", "active": true,
                    "footer_text": null, "has_active_autoresponder": false
                }),
            ];
            s.aliases = vec![json!({
                "id": 21, "domain_id": 7, "name": "sales@example.com",
                "to": "jan@example.com", "active": true
            })];
            s.audit = (1..=5)
                .map(|i| {
                    json!({
                        "id": i,
                        "actor_type": "user",
                        "actor_id": 1,
                        "event_type": if i % 2 == 0 {
                            "mailbox.created"
                        } else {
                            "user.password_changed"
                        },
                        "entity_type": "mailbox",
                        "entity_id": 11,
                        "old_value": null,
                        "new_value": { "n": i },
                        "status": "success",
                        "domain_id": 7,
                        "created_at": "2025-03-01T12:00:00Z"
                    })
                })
                .collect();

            s.tokens.insert(ADMIN_TOKEN.into(), Principal::Admin(1));
            s.tokens.insert(MANAGER_TOKEN.into(), Principal::Manager(2));
            s.tokens.insert(MAILBOX_TOKEN.into(), Principal::Mailbox(11));

            s.logins.insert("root@example.com".into(), ("rootpass1".into(), ADMIN_TOKEN.into()));
            s.logins.insert(
                "manager@example.com".into(),
                ("managerpass".into(), MANAGER_TOKEN.into()),
            );
            s.logins.insert("jan@example.com".into(), ("janpass12".into(), MAILBOX_TOKEN.into()));

            s.profiles.insert(ADMIN_TOKEN.into(), user(1, "root@example.com", "administrator"));
            s.profiles.insert(MANAGER_TOKEN.into(), user(2, "manager@example.com", "user"));
            // Mailbox profile: domain reference, no role, no email.
            s.profiles.insert(
                MAILBOX_TOKEN.into(),
                json!({
                    "id": 11,
                    "domain_id": 7,
                    "name": "jan",
                    "active": true,
                    "footer_text": null,
                    "has_active_autoresponder": false,
                    "domain": { "id": 7, "name": "example.com" }
                }),
            );
        }
        api
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn revoke(&self, token: &str) {
        self.state().tokens.remove(token);
    }

    pub fn fail(&self, path: &str, status: u16) {
        self.state().failing.insert(path.to_string(), status);
    }

    pub fn heal(&self, path: &str) {
        self.state().failing.remove(path);
    }

    fn router(&self) -> Router {
        let routes = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/logout", post(logout))
            .route("/auth/logout-all", post(logout_all))
            .route("/me", get(me))
            .route("/me/password", put(change_password))
            .route("/me/domains", get(my_domains))
            .route("/users", get(list_users).post(create_user))
            .route("/users/:id", get(get_user).put(update_user))
            .route("/users/:id/password", put(reset_user_password))
            .route("/users/:id/logout-all", post(user_logout_all))
            .route("/users/:id/domains/:domain_id", post(assign).delete(unassign))
            .route("/domains", get(list_domains).post(create_domain))
            .route("/domains/:id", put(update_domain).delete(delete_domain))
            .route("/domains/:id/managers", get(domain_managers))
            .route("/domains/:id/mailboxes", get(list_mailboxes).post(create_mailbox))
            .route(
                "/domains/:id/mailboxes/:mid",
                put(update_mailbox).delete(delete_mailbox),
            )
            .route("/domains/:id/mailboxes/:mid/password", put(reset_mailbox_password))
            .route("/domains/:id/mailboxes/:mid/logout-all", post(mailbox_logout_all))
            .route("/domains/:id/aliases", get(list_aliases).post(create_alias))
            .route("/domains/:id/aliases/:aid", put(update_alias).delete(delete_alias))
            .route("/mailbox/footer", get(get_footer).put(put_footer))
            .route(
                "/mailbox/autoresponder",
                get(get_autoresponder).put(put_autoresponder).delete(delete_autoresponder),
            )
            .route("/audit-logs", get(audit_logs));

        Router::new()
            .nest("/api", routes)
            .layer(from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }
}

pub struct TestServer {
    pub api: FakeApi,
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(api: FakeApi) -> Self {
        let app = api.router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}/api");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { api, base_url, handle }
    }

    pub async fn seeded() -> Self {
        Self::spawn(FakeApi::seeded()).await
    }

    /// Client with an in-memory session holding `token`, identity unresolved.
    pub fn client(&self, token: Option<&str>) -> ApiClient {
        let config = ClientConfig {
            api_base_url: self.base_url.clone(),
            ..ClientConfig::default()
        }
        .without_session_file();
        let session = Session::in_memory();
        if let Some(token) = token {
            session.store_credential(Credential::new(token)).unwrap();
        }
        ApiClient::new(&config, session).unwrap()
    }

    /// Console already bootstrapped (identity resolved) for `token`.
    pub async fn console_as(&self, token: &str) -> Console {
        let console = Console::new(self.client(Some(token)));
        console.bootstrap(None).await.unwrap();
        console
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn user(id: i64, email: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "firstname": null,
        "lastname": null,
        "role": role,
        "active": true,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    })
}

/// Copy the listed fields present in `patch` onto `target`.
fn merge(target: &mut Value, patch: &Value, fields: &[&str]) {
    for field in fields {
        if let Some(v) = patch.get(*field) {
            target[*field] = v.clone();
        }
    }
    target["updated_at"] = json!("2025-05-01T08:00:00Z");
}

fn created(text: &str, key: &str, entity: Value) -> Response {
    (StatusCode::CREATED, Json(json!({ "message": text, key: entity }))).into_response()
}

fn updated(text: &str, key: &str, entity: Value) -> Response {
    Json(json!({ "message": text, key: entity })).into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn message(text: &str) -> Response {
    Json(json!({ "message": text })).into_response()
}

async fn record(State(api): State<FakeApi>, req: Request, next: Next) -> Response {
    let full = req.uri().path().to_string();
    let path = full.strip_prefix("/api").unwrap_or(&full).to_string();
    let injected = {
        let mut s = api.state();
        s.requests.push(format!("{} {}", req.method(), path));
        s.failing.get(&path).copied()
    };
    if let Some(status) = injected {
        let status = StatusCode::from_u16(status).unwrap();
        return error(status, "injected failure");
    }
    next.run(req).await
}

fn principal(api: &FakeApi, headers: &HeaderMap) -> Result<Principal, Response> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    token
        .and_then(|t| api.state().tokens.get(t).copied())
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Invalid or expired token"))
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn admin_only(p: Principal) -> Result<(), Response> {
    match p {
        Principal::Admin(_) => Ok(()),
        _ => Err(error(StatusCode::FORBIDDEN, "Administrator access required")),
    }
}

fn domain_access(api: &FakeApi, p: Principal, domain: i64) -> Result<(), Response> {
    match p {
        Principal::Admin(_) => Ok(()),
        Principal::Manager(id) if api.state().assignments.contains(&(id, domain)) => Ok(()),
        _ => Err(error(StatusCode::FORBIDDEN, "Access denied to this domain")),
    }
}

fn mailbox_only(p: Principal) -> Result<i64, Response> {
    match p {
        Principal::Mailbox(id) => Ok(id),
        _ => Err(error(StatusCode::FORBIDDEN, "Mailbox access required")),
    }
}

macro_rules! tri {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(resp) => return resp,
        }
    };
}

async fn login(State(api): State<FakeApi>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let s = api.state();
    match s.logins.get(email) {
        Some((expected, token)) if expected == password => {
            Json(json!({ "token": token })).into_response()
        }
        _ => error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

async fn logout(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    tri!(principal(&api, &headers));
    if let Some(token) = bearer(&headers) {
        api.revoke(&token);
    }
    message("Logged out successfully")
}

async fn logout_all(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    let p = tri!(principal(&api, &headers));
    api.state().tokens.retain(|_, owner| *owner != p);
    message("Logged out from all sessions")
}

async fn me(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    tri!(principal(&api, &headers));
    let token = bearer(&headers).unwrap_or_default();
    match api.state().profiles.get(&token) {
        Some(profile) => Json(profile.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Profile not found"),
    }
}

async fn change_password(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    tri!(principal(&api, &headers));
    if body["current_password"].as_str().unwrap_or_default().is_empty() {
        return error(StatusCode::BAD_REQUEST, "Current password is required");
    }
    message("Password changed successfully")
}

async fn my_domains(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    let p = tri!(principal(&api, &headers));
    let s = api.state();
    let domains: Vec<Value> = match p {
        Principal::Admin(_) => s.domains.clone(),
        Principal::Manager(id) => s
            .domains
            .iter()
            .filter(|d| s.assignments.contains(&(id, d["id"].as_i64().unwrap_or_default())))
            .cloned()
            .collect(),
        Principal::Mailbox(_) => return error(StatusCode::FORBIDDEN, "Not available for mailboxes"),
    };
    Json(json!({ "total": domains.len(), "domains": domains })).into_response()
}

async fn list_users(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    let users = api.state().users.clone();
    Json(json!({ "total": users.len(), "users": users })).into_response()
}

async fn user_logout_all(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    api.state()
        .tokens
        .retain(|_, owner| {
            !matches!(owner, Principal::Admin(u) | Principal::Manager(u) if *u == id)
        });
    message("User logged out from all sessions")
}

async fn create_user(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    let mut s = api.state();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if s.users.iter().any(|u| u["email"] == email.as_str()) {
        return error(StatusCode::CONFLICT, "User with this email already exists");
    }
    let id = s.next_id();
    let mut created_user = user(id, &email, body["role"].as_str().unwrap_or("user"));
    merge(&mut created_user, &body, &["firstname", "lastname", "active"]);
    let password = body["password"].as_str().unwrap_or_default().to_string();
    s.logins.insert(email, (password, format!("token-{id}")));
    s.users.push(created_user.clone());
    created("User created successfully", "user", created_user)
}

async fn get_user(State(api): State<FakeApi>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    match api.state().users.iter().find(|u| u["id"] == id) {
        Some(found) => Json(found.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn update_user(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    let mut s = api.state();
    let Some(target) = s.users.iter_mut().find(|u| u["id"] == id) else {
        return error(StatusCode::NOT_FOUND, "User not found");
    };
    merge(target, &body, &["email", "firstname", "lastname", "role", "active"]);
    let saved = target.clone();
    updated("User updated successfully", "user", saved)
}

async fn reset_user_password(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    let mut s = api.state();
    let Some(email) = s
        .users
        .iter()
        .find(|u| u["id"] == id)
        .and_then(|u| u["email"].as_str())
        .map(str::to_string)
    else {
        return error(StatusCode::NOT_FOUND, "User not found");
    };
    let password = body["password"].as_str().unwrap_or_default().to_string();
    if let Some(login) = s.logins.get_mut(&email) {
        login.0 = password;
    }
    message("Password changed successfully")
}

async fn assign(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path((id, domain)): Path<(i64, i64)>,
) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    if !api.state().assignments.insert((id, domain)) {
        return error(StatusCode::CONFLICT, "User is already assigned to this domain");
    }
    message("Domain assigned successfully")
}

async fn unassign(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path((id, domain)): Path<(i64, i64)>,
) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    if !api.state().assignments.remove(&(id, domain)) {
        return error(StatusCode::NOT_FOUND, "Assignment not found");
    }
    message("Domain unassigned successfully")
}

async fn list_domains(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    let domains = api.state().domains.clone();
    Json(json!({ "total": domains.len(), "domains": domains })).into_response()
}

async fn create_domain(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    let mut s = api.state();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    if s.domains.iter().any(|d| d["name"] == name.as_str()) {
        return error(StatusCode::CONFLICT, "Domain already exists");
    }
    let id = s.next_id();
    let domain = json!({
        "id": id,
        "name": name,
        "active": body["active"].as_bool().unwrap_or(true),
        "created_at": "2025-05-01 08:00:00"
    });
    s.domains.push(domain.clone());
    created("Domain created successfully", "domain", domain)
}

async fn update_domain(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    let mut s = api.state();
    let Some(target) = s.domains.iter_mut().find(|d| d["id"] == id) else {
        return error(StatusCode::NOT_FOUND, "Domain not found");
    };
    merge(target, &body, &["name", "active"]);
    let saved = target.clone();
    updated("Domain updated successfully", "domain", saved)
}

async fn delete_domain(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    let mut s = api.state();
    s.domains.retain(|d| d["id"] != id);
    s.mailboxes.retain(|m| m["domain_id"] != id);
    s.aliases.retain(|a| a["domain_id"] != id);
    s.assignments.retain(|(_, d)| *d != id);
    message("Domain deleted successfully")
}

async fn domain_managers(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    tri!(admin_only(tri!(principal(&api, &headers))));
    let s = api.state();
    let managers: Vec<Value> = s
        .users
        .iter()
        .filter(|u| s.assignments.contains(&(u["id"].as_i64().unwrap_or_default(), id)))
        .cloned()
        .collect();
    Json(json!({ "managers": managers })).into_response()
}

async fn list_mailboxes(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    tri!(domain_access(&api, p, id));
    let mailboxes: Vec<Value> = api
        .state()
        .mailboxes
        .iter()
        .filter(|m| m["domain_id"] == id)
        .cloned()
        .collect();
    Json(json!({ "total": mailboxes.len(), "mailboxes": mailboxes })).into_response()
}

async fn create_mailbox(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    tri!(domain_access(&api, p, id));
    let mut s = api.state();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    if s.mailboxes.iter().any(|m| m["domain_id"] == id && m["name"] == name.as_str()) {
        return error(StatusCode::CONFLICT, "Mailbox already exists");
    }
    let mailbox_id = s.next_id();
    let mailbox = json!({
        "id": mailbox_id,
        "domain_id": id,
        "name": name,
        "active": body["active"].as_bool().unwrap_or(true),
        "footer_text": null,
        "has_active_autoresponder": false,
        "created_at": "2025-05-01T08:00:00Z"
    });
    s.mailboxes.push(mailbox.clone());
    created("Mailbox created successfully", "mailbox", mailbox)
}

async fn update_mailbox(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path((id, mid)): Path<(i64, i64)>,
    Json(body): Json<Value>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    tri!(domain_access(&api, p, id));
    let mut s = api.state();
    let Some(target) = s
        .mailboxes
        .iter_mut()
        .find(|m| m["id"] == mid && m["domain_id"] == id)
    else {
        return error(StatusCode::NOT_FOUND, "Mailbox not found");
    };
    merge(target, &body, &["name", "active"]);
    let saved = target.clone();
    updated("Mailbox updated successfully", "mailbox", saved)
}

async fn reset_mailbox_password(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path((id, mid)): Path<(i64, i64)>,
    Json(body): Json<Value>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    tri!(domain_access(&api, p, id));
    let mut s = api.state();
    let Some(local) = s
        .mailboxes
        .iter()
        .find(|m| m["id"] == mid && m["domain_id"] == id)
        .and_then(|m| m["name"].as_str())
        .map(str::to_string)
    else {
        return error(StatusCode::NOT_FOUND, "Mailbox not found");
    };
    let address = format!("{local}@{}", s.domain_name(id).unwrap_or_default());
    let password = body["password"].as_str().unwrap_or_default().to_string();
    if let Some(login) = s.logins.get_mut(&address) {
        login.0 = password;
    }
    message("Password changed successfully")
}

async fn mailbox_logout_all(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path((id, mid)): Path<(i64, i64)>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    tri!(domain_access(&api, p, id));
    api.state()
        .tokens
        .retain(|_, owner| *owner != Principal::Mailbox(mid));
    message("Mailbox logged out from all sessions")
}

async fn delete_mailbox(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path((id, mid)): Path<(i64, i64)>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    tri!(domain_access(&api, p, id));
    api.state().mailboxes.retain(|m| m["id"] != mid);
    message("Mailbox deleted successfully")
}

async fn list_aliases(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    tri!(domain_access(&api, p, id));
    let aliases: Vec<Value> = api
        .state()
        .aliases
        .iter()
        .filter(|a| a["domain_id"] == id)
        .cloned()
        .collect();
    Json(json!({ "total": aliases.len(), "aliases": aliases })).into_response()
}

async fn create_alias(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    tri!(domain_access(&api, p, id));
    let mut s = api.state();
    let Some(domain) = s.domain_name(id) else {
        return error(StatusCode::NOT_FOUND, "Domain not found");
    };
    let local = body["name"].as_str().unwrap_or_default();
    let alias_id = s.next_id();
    let alias = json!({
        "id": alias_id,
        "domain_id": id,
        "name": format!("{local}@{domain}"),
        "to": body["to"],
        "active": true,
        "created_at": "2025-04-01T09:30:00Z"
    });
    s.aliases.push(alias.clone());
    created("Alias created successfully", "alias", alias)
}

async fn update_alias(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path((id, aid)): Path<(i64, i64)>,
    Json(body): Json<Value>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    tri!(domain_access(&api, p, id));
    let mut s = api.state();
    let Some(target) = s
        .aliases
        .iter_mut()
        .find(|a| a["id"] == aid && a["domain_id"] == id)
    else {
        return error(StatusCode::NOT_FOUND, "Alias not found");
    };
    // The source address is immutable.
    merge(target, &body, &["to", "active"]);
    let saved = target.clone();
    updated("Alias updated successfully", "alias", saved)
}

async fn delete_alias(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Path((id, aid)): Path<(i64, i64)>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    tri!(domain_access(&api, p, id));
    api.state().aliases.retain(|a| a["id"] != aid);
    message("Alias deleted successfully")
}

async fn get_footer(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    let id = tri!(mailbox_only(tri!(principal(&api, &headers))));
    let footer = api.state().footer.clone();
    Json(json!({ "id": id, "footer_text": footer })).into_response()
}

async fn put_footer(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    tri!(mailbox_only(tri!(principal(&api, &headers))));
    api.state().footer = body["footer_text"].as_str().map(str::to_string);
    message("Footer updated successfully")
}

async fn get_autoresponder(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    tri!(mailbox_only(tri!(principal(&api, &headers))));
    let current = api.state().autoresponder.clone();
    Json(json!({ "autoresponder": current })).into_response()
}

async fn put_autoresponder(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    tri!(mailbox_only(tri!(principal(&api, &headers))));
    if body["subject"].as_str().unwrap_or_default().is_empty() {
        return error(StatusCode::BAD_REQUEST, "Subject and body are required");
    }
    api.state().autoresponder = Some(body);
    message("Autoresponder updated successfully")
}

async fn delete_autoresponder(State(api): State<FakeApi>, headers: HeaderMap) -> Response {
    tri!(mailbox_only(tri!(principal(&api, &headers))));
    api.state().autoresponder = None;
    message("Autoresponder deleted")
}

const PAGE_SIZE: usize = 2;

async fn audit_logs(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let p = tri!(principal(&api, &headers));
    let domain = params.get("domain_id").and_then(|d| d.parse::<i64>().ok());
    match domain {
        Some(d) => tri!(domain_access(&api, p, d)),
        None => tri!(admin_only(p)),
    }
    let page = params
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);

    let s = api.state();
    let matching: Vec<Value> = s
        .audit
        .iter()
        .filter(|e| domain.is_none_or(|d| e["domain_id"] == d))
        .cloned()
        .collect();
    let total = matching.len();
    let total_pages = total.div_ceil(PAGE_SIZE);
    let logs: Vec<Value> = matching
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    let mut body = json!({
        "logs": logs,
        "pagination": {
            "page": page,
            "page_size": PAGE_SIZE,
            "total_items": total,
            "total_pages": total_pages
        }
    });
    if let Some(d) = domain {
        body["domain_id"] = json!(d);
        body["domain_name"] = json!(s.domain_name(d));
    }
    Json(body).into_response()
}
