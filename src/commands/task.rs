//! Task Commands
//!
//! Frontend bindings for task CRUD.

use super::to_message;
use crate::context::AppContext;
use crate::models::{NewTask, Status, Task, TaskId, TaskPatch};

// ========================
// Task Commands
// ========================

pub async fn list_tasks(ctx: AppContext) -> Result<Vec<Task>, String> {
    ctx.tasks().list().await.map_err(to_message)
}

pub async fn create_task(ctx: AppContext, new_task: NewTask) -> Result<Task, String> {
    ctx.tasks().create(new_task).await.map_err(to_message)
}

pub async fn update_task(ctx: AppContext, id: TaskId, patch: TaskPatch) -> Result<Task, String> {
    ctx.tasks().update(&id, patch).await.map_err(to_message)
}

pub async fn set_task_status(ctx: AppContext, id: TaskId, status: Status) -> Result<Task, String> {
    ctx.tasks().set_status(&id, status).await.map_err(to_message)
}

pub async fn toggle_task(ctx: AppContext, id: TaskId) -> Result<Task, String> {
    ctx.tasks().toggle_completed(&id).await.map_err(to_message)
}

pub async fn delete_task(ctx: AppContext, id: TaskId) -> Result<(), String> {
    ctx.tasks().delete(&id).await.map_err(to_message)
}
