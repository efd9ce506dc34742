//! Frontend Models
//!
//! Core types used by the views, plus UI-only state.

pub use boltflow_core::{
    Identity, NewTask, Priority, ProfileUpdate, SignUpOutcome, SortField, SortState, Status, Task, TaskFilter,
    TaskId, TaskPatch,
};

/// Which screen the signed-in layout shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Completed,
    Profile,
}

impl Page {
    pub const NAV: [Page; 2] = [Page::Dashboard, Page::Completed];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "To Do",
            Page::Completed => "Completed",
            Page::Profile => "My Profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}
