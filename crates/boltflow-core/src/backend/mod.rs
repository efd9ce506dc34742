//! Backend Layer - Remote Collaborator Traits
//!
//! Defines the abstract interfaces to the hosted backend.
//! Implementations: the Supabase REST client and an in-memory stand-in.
//!
//! Execution is single-threaded, so futures are not required to be `Send`.

mod memory;
mod supabase;

use async_trait::async_trait;

use crate::domain::{Identity, NewTaskRow, ProfileChanges, Session, Task, TaskId, TaskPatch};
use crate::error::DomainResult;

pub use memory::MemoryBackend;
pub use supabase::SupabaseClient;

/// Result of a sign-up call
#[derive(Debug, Clone, PartialEq)]
pub enum SignUp {
    /// Account created, email confirmation outstanding
    Pending(Identity),
    /// Backend confirmed immediately and issued a session
    Session(Session),
}

/// Authentication operations
#[async_trait(?Send)]
pub trait AuthBackend {
    /// Exchange email and password for a session
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<Session>;

    /// Register a new account with a display name
    async fn sign_up(&self, email: &str, password: &str, name: &str) -> DomainResult<SignUp>;

    /// Revoke the session remotely
    async fn sign_out(&self, session: &Session) -> DomainResult<()>;

    /// Exchange a stored session's refresh token for a fresh session
    async fn refresh(&self, session: &Session) -> DomainResult<Session>;

    /// Apply name and password changes, returning the updated identity
    async fn update_user(&self, session: &Session, changes: &ProfileChanges) -> DomainResult<Identity>;

    /// Ask the backend to email a reset link
    async fn request_password_reset(&self, email: &str, redirect_to: Option<&str>) -> DomainResult<()>;
}

/// Operations on the `tasks` table, always on behalf of a session
#[async_trait(?Send)]
pub trait TaskTable {
    /// Rows owned by the session's identity, newest first
    async fn select_owned(&self, session: &Session) -> DomainResult<Vec<Task>>;

    /// Insert one row and return it as stored
    async fn insert(&self, session: &Session, row: &NewTaskRow) -> DomainResult<Task>;

    /// Patch one row; `None` when no row matched
    async fn update(&self, session: &Session, id: &TaskId, patch: &TaskPatch) -> DomainResult<Option<Task>>;

    /// Delete one row; `false` when no row matched
    async fn delete(&self, session: &Session, id: &TaskId) -> DomainResult<bool>;
}
