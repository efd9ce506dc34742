//! Repository Layer
//!
//! In-memory snapshot of the signed-in identity's tasks, kept in step with
//! the remote table.

mod task_repo;


pub use task_repo::TaskRepository;
