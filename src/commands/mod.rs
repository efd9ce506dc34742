//! Command Wrappers
//!
//! Async calls into the session store and task repository, organized by
//! domain. Errors come back as display strings ready for a toast.

mod auth;
mod task;

use boltflow_core::DomainError;

fn to_message(err: DomainError) -> String {
    err.to_string()
}

// Re-export all public items
pub use auth::*;
pub use task::*;
