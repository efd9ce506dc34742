//! Supabase REST Client
//!
//! Speaks to GoTrue (`/auth/v1`) for authentication and PostgREST
//! (`/rest/v1`) for the `tasks` table. Every request carries the project's
//! anon key in `apikey`; table requests authenticate as the signed-in user.
//!
//! No retries and no timeouts beyond what the HTTP client does itself.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{AuthBackend, SignUp, TaskTable};
use crate::config::BackendConfig;
use crate::domain::{Identity, IdentityId, NewTaskRow, ProfileChanges, Session, Task, TaskId, TaskPatch};
use crate::error::{DomainError, DomainResult};

const TASKS_PATH: &str = "rest/v1/tasks";
const RETURN_REPRESENTATION: &str = "return=representation";

/// HTTP client for one Supabase project
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    anon_key: String,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> DomainResult<Self> {
        Ok(Self {
            http: Client::new(),
            base_url: config.base_url()?,
            anon_key: config.anon_key.trim().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> DomainResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| DomainError::Config(format!("{}: {}", path, e)))
    }

    fn request(&self, method: Method, url: Url, bearer: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    fn anon(&self, method: Method, path: &str) -> DomainResult<RequestBuilder> {
        Ok(self.request(method, self.endpoint(path)?, &self.anon_key))
    }

    fn as_user(&self, method: Method, url: Url, session: &Session) -> RequestBuilder {
        self.request(method, url, &session.access_token)
    }

    fn task_url(&self, id: &TaskId) -> DomainResult<Url> {
        let mut url = self.endpoint(TASKS_PATH)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));
        Ok(url)
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> DomainResult<Response> {
        debug!("supabase: {what}");
        builder.send().await.map_err(|e| {
            warn!("supabase: {what} failed to send: {e}");
            DomainError::Transport(e.to_string())
        })
    }

    async fn auth_call(&self, builder: RequestBuilder, what: &str) -> DomainResult<Response> {
        let response = self.send(builder, what).await?;
        if response.status().is_success() {
            return Ok(response);
        }
        let (status, message) = read_error(response).await;
        warn!("supabase: {what} rejected ({status}): {message}");
        Err(if (400..500).contains(&status) {
            DomainError::Auth(message)
        } else {
            DomainError::Service { status, message }
        })
    }

    async fn auth_json<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> DomainResult<T> {
        Ok(self.auth_call(builder, what).await?.json::<T>().await?)
    }

    async fn rest_json<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> DomainResult<T> {
        let response = self.send(builder, what).await?;
        if !response.status().is_success() {
            let (status, message) = read_error(response).await;
            warn!("supabase: {what} rejected ({status}): {message}");
            return Err(match status {
                401 => DomainError::Auth(message),
                _ => DomainError::Service { status, message },
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait(?Send)]
impl AuthBackend for SupabaseClient {
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<Session> {
        let request = self
            .anon(Method::POST, "auth/v1/token")?
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        let token: TokenResponse = self.auth_json(request, "sign in").await?;
        Ok(token.into_session())
    }

    async fn sign_up(&self, email: &str, password: &str, name: &str) -> DomainResult<SignUp> {
        let request = self.anon(Method::POST, "auth/v1/signup")?.json(&json!({
            "email": email,
            "password": password,
            "data": { "name": name },
        }));
        match self.auth_json::<SignUpResponse>(request, "sign up").await? {
            SignUpResponse::Session(token) => Ok(SignUp::Session(token.into_session())),
            // An existing, confirmed address comes back as a user with no identities
            SignUpResponse::User(user) if user.identities.as_ref().map_or(false, Vec::is_empty) => {
                Err(DomainError::auth("User already registered"))
            }
            SignUpResponse::User(user) => Ok(SignUp::Pending(user.into_identity())),
        }
    }

    async fn sign_out(&self, session: &Session) -> DomainResult<()> {
        let request = self.as_user(Method::POST, self.endpoint("auth/v1/logout")?, session);
        self.auth_call(request, "sign out").await.map(|_| ())
    }

    async fn refresh(&self, session: &Session) -> DomainResult<Session> {
        let request = self
            .anon(Method::POST, "auth/v1/token")?
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": session.refresh_token }));
        let token: TokenResponse = self.auth_json(request, "refresh session").await?;
        Ok(token.into_session())
    }

    async fn update_user(&self, session: &Session, changes: &ProfileChanges) -> DomainResult<Identity> {
        let mut body = Map::new();
        if let Some(password) = &changes.password {
            body.insert("password".into(), Value::String(password.clone()));
        }
        if let Some(name) = &changes.name {
            body.insert("data".into(), json!({ "name": name }));
        }
        let request = self
            .as_user(Method::PUT, self.endpoint("auth/v1/user")?, session)
            .json(&Value::Object(body));
        let user: UserResponse = self.auth_json(request, "update user").await?;
        Ok(user.into_identity())
    }

    async fn request_password_reset(&self, email: &str, redirect_to: Option<&str>) -> DomainResult<()> {
        let mut url = self.endpoint("auth/v1/recover")?;
        if let Some(redirect) = redirect_to {
            url.query_pairs_mut().append_pair("redirect_to", redirect);
        }
        let request = self
            .request(Method::POST, url, &self.anon_key)
            .json(&json!({ "email": email }));
        self.auth_call(request, "password reset").await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl TaskTable for SupabaseClient {
    async fn select_owned(&self, session: &Session) -> DomainResult<Vec<Task>> {
        let owner = format!("eq.{}", session.user.id);
        let request = self
            .as_user(Method::GET, self.endpoint(TASKS_PATH)?, session)
            .query(&[("select", "*"), ("user_id", owner.as_str()), ("order", "created_at.desc")]);
        self.rest_json(request, "select tasks").await
    }

    async fn insert(&self, session: &Session, row: &NewTaskRow) -> DomainResult<Task> {
        let request = self
            .as_user(Method::POST, self.endpoint(TASKS_PATH)?, session)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(row);
        let rows: Vec<Task> = self.rest_json(request, "insert task").await?;
        rows.into_iter().next().ok_or_else(|| DomainError::Service {
            status: 201,
            message: "insert returned no row".into(),
        })
    }

    async fn update(&self, session: &Session, id: &TaskId, patch: &TaskPatch) -> DomainResult<Option<Task>> {
        let request = self
            .as_user(Method::PATCH, self.task_url(id)?, session)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(patch);
        let rows: Vec<Task> = self.rest_json(request, "update task").await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, session: &Session, id: &TaskId) -> DomainResult<bool> {
        let request = self
            .as_user(Method::DELETE, self.task_url(id)?, session)
            .header("Prefer", RETURN_REPRESENTATION);
        let rows: Vec<Value> = self.rest_json(request, "delete task").await?;
        Ok(!rows.is_empty())
    }
}

// ========================
// Wire Types
// ========================

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: UserResponse,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into_identity(),
        }
    }
}

#[derive(Deserialize)]
struct UserResponse {
    id: String,
    email: Option<String>,
    user_metadata: Option<UserMetadata>,
    identities: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct UserMetadata {
    name: Option<String>,
}

impl UserResponse {
    fn into_identity(self) -> Identity {
        Identity {
            id: IdentityId(self.id),
            email: self.email.unwrap_or_default(),
            name: self.user_metadata.and_then(|m| m.name),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(UserResponse),
}

/// GoTrue and PostgREST disagree on where the message lives
#[derive(Deserialize, Default)]
struct ErrorBody {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

async fn read_error(response: Response) -> (u16, String) {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    let message = body
        .msg
        .or(body.error_description)
        .or(body.message)
        .or(body.error)
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("Request failed").to_string()
            } else {
                text
            }
        });
    (status.as_u16(), message)
}
