//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use boltflow_core::domain::{remove_entity, replace_entity};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Identity, SortState, Task, TaskId, Toast, ToastKind};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Confirmed tasks of the signed-in user, all statuses
    pub tasks: Vec<Task>,
    /// True while the first fetch after sign-in is in flight
    pub tasks_loading: bool,
    /// Signed-in user, None when signed out
    pub identity: Option<Identity>,
    /// Set once the stored session has been checked
    pub auth_ready: bool,
    /// Table sort, shared by both task pages
    pub sort: SortState,
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            next_toast_id: 1,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Put a newly created task at the top
pub fn store_add_task(store: &AppStore, task: Task) {
    store.tasks().write().insert(0, task);
}

/// Replace a task in the store by ID
pub fn store_update_task(store: &AppStore, updated: Task) {
    replace_entity(&mut *store.tasks().write(), updated);
}

/// Remove a task from the store by ID
pub fn store_remove_task(store: &AppStore, id: &TaskId) {
    remove_entity(&mut *store.tasks().write(), id);
}

/// Drop everything tied to the previous user
pub fn store_clear_user(store: &AppStore) {
    store.tasks().set(Vec::new());
    store.identity().set(None);
    store.sort().set(SortState::default());
}

/// Queue a toast; returns its id for dismissal
pub fn store_push_toast(store: &AppStore, kind: ToastKind, message: String) -> u32 {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id + 1);
    store.toasts().write().push(Toast { id, kind, message });
    id
}

pub fn store_dismiss_toast(store: &AppStore, id: u32) {
    store.toasts().write().retain(|t| t.id != id);
}
