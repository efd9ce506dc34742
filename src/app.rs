//! BoltFlow Frontend App
//!
//! Wires the backend, session store and task repository into context and
//! picks the screen: setup, loading, login or the signed-in layout.

use std::rc::Rc;

use boltflow_core::{AuthEvent, BackendConfig, SessionStore, SupabaseClient, TaskRepository};
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};
use reactive_stores::Store;

use crate::browser_storage::BrowserSessionStorage;
use crate::commands;
use crate::components::toast::toast_error;
use crate::components::{DatabaseSetup, Layout, LoadingScreen, LoginForm, ToastHost};
use crate::context::{AppContext, Services};
use crate::models::Page;
use crate::store::{store_clear_user, AppState, AppStateStoreFields, AppStore};

/// Build the services for a configured backend
fn connect(config: &BackendConfig) -> Option<Services> {
    if !config.is_configured() {
        return None;
    }
    let client = match SupabaseClient::new(config) {
        Ok(client) => Rc::new(client),
        Err(e) => {
            error!("backend configuration rejected: {}", e);
            return None;
        }
    };
    let session = Rc::new(SessionStore::new(client.clone(), Rc::new(BrowserSessionStorage::new())));
    let tasks = Rc::new(TaskRepository::new(client, session.clone()));
    Some(Services { session, tasks })
}

#[component]
pub fn App() -> impl IntoView {
    let Some(services) = connect(&BackendConfig::from_build_env()) else {
        return view! { <DatabaseSetup /> }.into_any();
    };

    let store: AppStore = Store::new(AppState::new());
    provide_context(store);

    let (page, set_page) = signal(Page::default());
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    // Mirror session transitions into the store
    let repo = services.tasks.clone();
    services.session.subscribe(move |change| {
        info!("auth event {:?}", change.event);
        if change.event == AuthEvent::SignedOut {
            repo.reset();
            store_clear_user(&store);
            set_page.set(Page::Dashboard);
            return;
        }
        store.identity().set(change.identity.clone());
    });

    let session = services.session.clone();
    let ctx = AppContext::new(services, (page, set_page), (reload_trigger, set_reload_trigger));
    provide_context(ctx);

    // Restore the stored session once
    spawn_local(async move {
        session.init().await;
        store.auth_ready().set(true);
    });

    let identity_id = Memo::new(move |_| store.identity().with(|i| i.as_ref().map(|i| i.id.clone())));

    // Load tasks when the signed-in user or trigger changes
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        if identity_id.get().is_none() {
            return;
        }
        store.tasks_loading().set(true);
        spawn_local(async move {
            match commands::list_tasks(ctx).await {
                Ok(loaded) => store.tasks().set(loaded),
                Err(e) => toast_error(store, e),
            }
            store.tasks_loading().set(false);
        });
    });

    let signed_in = Memo::new(move |_| identity_id.with(Option::is_some));

    view! {
        <ToastHost />
        {move || {
            if !store.auth_ready().get() {
                view! { <LoadingScreen /> }.into_any()
            } else if signed_in.get() {
                view! { <Layout /> }.into_any()
            } else {
                view! { <LoginForm /> }.into_any()
            }
        }}
    }
    .into_any()
}
