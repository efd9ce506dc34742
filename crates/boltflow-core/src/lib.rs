//! BoltFlow Core
//!
//! Layered architecture:
//! - domain: Tasks, identities and their validation rules
//! - backend: Remote auth and task-table collaborators (Supabase, in-memory)
//! - session: The single source of truth for who is signed in
//! - repository: Task CRUD against the backend, with a confirmed snapshot
//! - view: Sorting and filtering for presentation

pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod session;
pub mod view;

pub use backend::{AuthBackend, MemoryBackend, SignUp, SupabaseClient, TaskTable};
pub use config::BackendConfig;
pub use domain::{
    Identity, IdentityId, NewTask, Priority, ProfileUpdate, Session, Status, Task, TaskId, TaskPatch,
};
pub use error::{DomainError, DomainResult};
pub use repository::TaskRepository;
pub use session::{
    AuthChange, AuthEvent, MemorySessionStorage, SessionStorage, SessionStore, SignUpOutcome, SubscriptionId,
};
pub use view::{filter_tasks, sort_tasks, SortDirection, SortField, SortState, TaskFilter};
