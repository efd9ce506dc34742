//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use boltflow_core::{SessionStore, TaskRepository};
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use crate::models::Page;

/// Session store and task repository for the configured backend
pub struct Services {
    pub session: Rc<SessionStore>,
    pub tasks: Rc<TaskRepository>,
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Not `Send`, so kept in local storage
    services: StoredValue<Services, LocalStorage>,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Trigger to reload tasks from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload tasks from backend - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        services: Services,
        page: (ReadSignal<Page>, WriteSignal<Page>),
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            services: StoredValue::new_local(services),
            page: page.0,
            set_page: page.1,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    pub fn session(&self) -> Rc<SessionStore> {
        self.services.with_value(|s| s.session.clone())
    }

    pub fn tasks(&self) -> Rc<TaskRepository> {
        self.services.with_value(|s| s.tasks.clone())
    }

    pub fn navigate(&self, page: Page) {
        self.set_page.set(page);
    }

    /// Trigger a reload of tasks
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
