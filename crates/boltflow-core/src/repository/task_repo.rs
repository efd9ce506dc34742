//! Task Repository
//!
//! Fire-and-confirm CRUD: the snapshot changes only after the remote call
//! succeeds. Overlapping calls are not coordinated; the last response to
//! resolve wins.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::backend::TaskTable;
use crate::domain::{remove_entity, replace_entity, NewTask, Session, Status, Task, TaskId, TaskPatch};
use crate::error::{DomainError, DomainResult};
use crate::session::SessionStore;

pub struct TaskRepository {
    table: Rc<dyn TaskTable>,
    session: Rc<SessionStore>,
    tasks: RefCell<Vec<Task>>,
}

impl TaskRepository {
    pub fn new(table: Rc<dyn TaskTable>, session: Rc<SessionStore>) -> Self {
        Self {
            table,
            session,
            tasks: RefCell::new(Vec::new()),
        }
    }

    /// Last confirmed state, newest first unless mutated since
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Drop the snapshot, e.g. after sign-out
    pub fn reset(&self) {
        self.tasks.borrow_mut().clear();
    }

    async fn session(&self) -> DomainResult<Session> {
        self.session.active_session().await
    }

    /// Refetch everything the current identity owns.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn list(&self) -> DomainResult<Vec<Task>> {
        let session = self.session().await?;
        match self.table.select_owned(&session).await {
            Ok(rows) => {
                debug!("loaded {} tasks", rows.len());
                *self.tasks.borrow_mut() = rows.clone();
                Ok(rows)
            }
            Err(e) => {
                warn!("loading tasks failed, keeping {} cached: {}", self.tasks.borrow().len(), e);
                Err(match e {
                    DomainError::Fetch(_) => e,
                    other => DomainError::Fetch(other.to_string()),
                })
            }
        }
    }

    pub async fn create(&self, new_task: NewTask) -> DomainResult<Task> {
        let session = self.session().await?;
        let row = new_task.into_row(session.user.id.clone())?;
        let task = self.table.insert(&session, &row).await?;
        debug!("created task {}", task.id);
        self.tasks.borrow_mut().insert(0, task.clone());
        Ok(task)
    }

    /// Apply a patch; the server's row replaces the cached one
    pub async fn update(&self, id: &TaskId, patch: TaskPatch) -> DomainResult<Task> {
        let patch = patch.normalized()?;
        if patch.is_empty() {
            return Err(DomainError::validation("No changes to save"));
        }
        let session = self.session().await?;
        let task = self
            .table
            .update(&session, id, &patch)
            .await?
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        debug!("updated task {}", task.id);
        replace_entity(&mut *self.tasks.borrow_mut(), task.clone());
        Ok(task)
    }

    pub async fn delete(&self, id: &TaskId) -> DomainResult<()> {
        let session = self.session().await?;
        if !self.table.delete(&session, id).await? {
            return Err(DomainError::NotFound(id.to_string()));
        }
        debug!("deleted task {}", id);
        remove_entity(&mut *self.tasks.borrow_mut(), id);
        Ok(())
    }

    pub async fn set_status(&self, id: &TaskId, status: Status) -> DomainResult<Task> {
        self.update(id, TaskPatch::status(status)).await
    }

    /// Completed goes back to to-do; anything else becomes completed
    pub async fn toggle_completed(&self, id: &TaskId) -> DomainResult<Task> {
        let current = self
            .tasks
            .borrow()
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.status)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        let next = match current {
            Status::Completed => Status::ToDo,
            Status::ToDo | Status::InProgress => Status::Completed,
        };
        self.set_status(id, next).await
    }
}
