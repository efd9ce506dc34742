//! Domain Layer
//!
//! Entities and value types shared by the session store, the task
//! repository and the presentation layer.

mod entity;
mod identity;
mod task;

pub use entity::{remove_entity, replace_entity, Entity};
pub(crate) use identity::check_password_policy;
pub use identity::{Identity, IdentityId, ProfileChanges, ProfileUpdate, Session, MIN_PASSWORD_LEN};
pub use task::{NewTask, NewTaskRow, Priority, Status, Task, TaskId, TaskPatch};
