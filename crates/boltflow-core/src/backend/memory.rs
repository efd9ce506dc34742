//! In-Memory Backend
//!
//! Process-local stand-in for the hosted backend. Mirrors the behaviour the
//! core depends on: password auth with email confirmation, refresh tokens,
//! per-owner row visibility, server-assigned ids and timestamps.
//! Used by the test suites and for wiring the UI without a project.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::{AuthBackend, SignUp, TaskTable};
use crate::domain::{
    Identity, IdentityId, NewTaskRow, ProfileChanges, Session, Task, TaskId, TaskPatch, MIN_PASSWORD_LEN,
};
use crate::error::{DomainError, DomainResult};

/// 2024-01-01T00:00:00Z
const EPOCH_SECS: i64 = 1_704_067_200;

struct MemoryUser {
    identity: Identity,
    password: String,
    confirmed: bool,
}

struct MemoryState {
    users: Vec<MemoryUser>,
    access_tokens: HashMap<String, (IdentityId, DateTime<Utc>)>,
    refresh_tokens: HashMap<String, IdentityId>,
    tasks: Vec<Task>,
    next_id: u64,
    clock: DateTime<Utc>,
    token_lifetime: Duration,
    offline: bool,
    auto_confirm: bool,
    reset_requests: Vec<String>,
}

/// Backend that keeps everything in a `RefCell`
pub struct MemoryBackend {
    state: RefCell<MemoryState>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(MemoryState {
                users: Vec::new(),
                access_tokens: HashMap::new(),
                refresh_tokens: HashMap::new(),
                tasks: Vec::new(),
                next_id: 1,
                clock: DateTime::<Utc>::from_timestamp(EPOCH_SECS, 0).unwrap_or_default(),
                token_lifetime: Duration::hours(1),
                offline: false,
                auto_confirm: false,
                reset_requests: Vec::new(),
            }),
        }
    }

    /// Add an already confirmed account
    pub fn with_user(self, email: &str, password: &str, name: Option<&str>) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let id = state.next_id();
            state.users.push(MemoryUser {
                identity: Identity {
                    id: IdentityId(format!("user-{}", id)),
                    email: email.to_string(),
                    name: name.map(String::from),
                },
                password: password.to_string(),
                confirmed: true,
            });
        }
        self
    }

    /// How long newly issued access tokens stay valid, measured on the wall clock
    pub fn set_token_lifetime(&self, lifetime: Duration) {
        self.state.borrow_mut().token_lifetime = lifetime;
    }

    /// Simulate a network outage for every call
    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    /// Issue a session directly from sign-up
    pub fn set_auto_confirm(&self, auto_confirm: bool) {
        self.state.borrow_mut().auto_confirm = auto_confirm;
    }

    /// Mark an account's email as confirmed
    pub fn confirm_email(&self, email: &str) {
        if let Some(user) = self.state.borrow_mut().user_by_email_mut(email) {
            user.confirmed = true;
        }
    }

    /// Invalidate every issued token
    pub fn revoke_sessions(&self) {
        let mut state = self.state.borrow_mut();
        state.access_tokens.clear();
        state.refresh_tokens.clear();
    }

    /// Emails that asked for a reset link, in order
    pub fn reset_requests(&self) -> Vec<String> {
        self.state.borrow().reset_requests.clone()
    }

    pub fn user_count(&self) -> usize {
        self.state.borrow().users.len()
    }

    pub fn task_count(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    fn online(&self) -> DomainResult<()> {
        if self.state.borrow().offline {
            return Err(DomainError::Transport("backend unreachable".into()));
        }
        Ok(())
    }
}

impl MemoryState {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += Duration::seconds(1);
        self.clock
    }

    fn user_by_email_mut(&mut self, email: &str) -> Option<&mut MemoryUser> {
        self.users
            .iter_mut()
            .find(|u| u.identity.email.eq_ignore_ascii_case(email.trim()))
    }

    fn issue_session(&mut self, user: Identity) -> Session {
        let n = self.next_id();
        let access_token = format!("access-{}", n);
        let refresh_token = format!("refresh-{}", n);
        let expires_at = Utc::now() + self.token_lifetime;
        self.access_tokens
            .insert(access_token.clone(), (user.id.clone(), expires_at));
        self.refresh_tokens.insert(refresh_token.clone(), user.id.clone());
        Session {
            access_token,
            refresh_token,
            expires_at: Some(expires_at),
            user,
        }
    }

    fn owner(&self, session: &Session) -> DomainResult<IdentityId> {
        match self.access_tokens.get(&session.access_token) {
            None => Err(DomainError::auth("Invalid JWT")),
            Some((_, expires_at)) if *expires_at <= Utc::now() => Err(DomainError::auth("JWT expired")),
            Some((owner, _)) => Ok(owner.clone()),
        }
    }

    fn identity(&self, id: &IdentityId) -> DomainResult<Identity> {
        self.users
            .iter()
            .find(|u| &u.identity.id == id)
            .map(|u| u.identity.clone())
            .ok_or_else(|| DomainError::auth("User not found"))
    }
}

#[async_trait(?Send)]
impl AuthBackend for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<Session> {
        self.online()?;
        let mut state = self.state.borrow_mut();
        let user = match state.user_by_email_mut(email) {
            Some(user) if user.password == password => user,
            _ => return Err(DomainError::auth("Invalid login credentials")),
        };
        if !user.confirmed {
            return Err(DomainError::auth("Email not confirmed"));
        }
        let identity = user.identity.clone();
        Ok(state.issue_session(identity))
    }

    async fn sign_up(&self, email: &str, password: &str, name: &str) -> DomainResult<SignUp> {
        self.online()?;
        let mut state = self.state.borrow_mut();
        if state.user_by_email_mut(email).is_some() {
            return Err(DomainError::auth("User already registered"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::auth("Password should be at least 6 characters"));
        }
        let id = state.next_id();
        let identity = Identity {
            id: IdentityId(format!("user-{}", id)),
            email: email.trim().to_string(),
            name: Some(name.to_string()),
        };
        let confirmed = state.auto_confirm;
        state.users.push(MemoryUser {
            identity: identity.clone(),
            password: password.to_string(),
            confirmed,
        });
        if confirmed {
            Ok(SignUp::Session(state.issue_session(identity)))
        } else {
            Ok(SignUp::Pending(identity))
        }
    }

    async fn sign_out(&self, session: &Session) -> DomainResult<()> {
        self.online()?;
        let mut state = self.state.borrow_mut();
        state.access_tokens.remove(&session.access_token);
        state.refresh_tokens.remove(&session.refresh_token);
        Ok(())
    }

    async fn refresh(&self, session: &Session) -> DomainResult<Session> {
        self.online()?;
        let mut state = self.state.borrow_mut();
        let owner = state
            .refresh_tokens
            .remove(&session.refresh_token)
            .ok_or_else(|| DomainError::auth("Invalid Refresh Token"))?;
        let identity = state.identity(&owner)?;
        Ok(state.issue_session(identity))
    }

    async fn update_user(&self, session: &Session, changes: &ProfileChanges) -> DomainResult<Identity> {
        self.online()?;
        let mut state = self.state.borrow_mut();
        let owner = state.owner(session)?;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.identity.id == owner)
            .ok_or_else(|| DomainError::auth("User not found"))?;
        if let Some(password) = &changes.password {
            user.password = password.clone();
        }
        if let Some(name) = &changes.name {
            user.identity.name = Some(name.clone());
        }
        Ok(user.identity.clone())
    }

    async fn request_password_reset(&self, email: &str, _redirect_to: Option<&str>) -> DomainResult<()> {
        self.online()?;
        self.state.borrow_mut().reset_requests.push(email.to_string());
        Ok(())
    }
}

#[async_trait(?Send)]
impl TaskTable for MemoryBackend {
    async fn select_owned(&self, session: &Session) -> DomainResult<Vec<Task>> {
        self.online()?;
        let state = self.state.borrow();
        let owner = state.owner(session)?;
        // Newest insert first, then order by timestamp
        let mut rows: Vec<Task> = state
            .tasks
            .iter()
            .rev()
            .filter(|t| t.user_id == owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, session: &Session, row: &NewTaskRow) -> DomainResult<Task> {
        self.online()?;
        let mut state = self.state.borrow_mut();
        let owner = state.owner(session)?;
        if row.user_id != owner {
            return Err(DomainError::Service {
                status: 403,
                message: "new row violates row-level security policy".into(),
            });
        }
        let id = state.next_id();
        let now = state.tick();
        let task = Task {
            id: TaskId(format!("task-{}", id)),
            title: row.title.clone(),
            description: row.description.clone(),
            priority: row.priority,
            status: row.status,
            user_id: owner,
            created_at: now,
            updated_at: now,
        };
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, session: &Session, id: &TaskId, patch: &TaskPatch) -> DomainResult<Option<Task>> {
        self.online()?;
        let mut state = self.state.borrow_mut();
        let owner = state.owner(session)?;
        let now = state.tick();
        let Some(task) = state
            .tasks
            .iter_mut()
            .find(|t| &t.id == id && t.user_id == owner)
        else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        task.updated_at = now;
        Ok(Some(task.clone()))
    }

    async fn delete(&self, session: &Session, id: &TaskId) -> DomainResult<bool> {
        self.online()?;
        let mut state = self.state.borrow_mut();
        let owner = state.owner(session)?;
        let before = state.tasks.len();
        state.tasks.retain(|t| !(&t.id == id && t.user_id == owner));
        Ok(state.tasks.len() != before)
    }
}
