//! Toast Notifications
//!
//! Success/error messages stacked in a corner, each removed after a fixed
//! delay or on click.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::ToastKind;
use crate::store::{store_dismiss_toast, store_push_toast, use_app_store, AppStateStoreFields, AppStore};

const TOAST_DURATION_MS: u32 = 4000;

pub fn show_toast(store: AppStore, kind: ToastKind, message: impl Into<String>) {
    let id = store_push_toast(&store, kind, message.into());
    spawn_local(async move {
        TimeoutFuture::new(TOAST_DURATION_MS).await;
        store_dismiss_toast(&store, id);
    });
}

pub fn toast_success(store: AppStore, message: impl Into<String>) {
    show_toast(store, ToastKind::Success, message);
}

pub fn toast_error(store: AppStore, message: impl Into<String>) {
    let message = message.into();
    log::debug!("error toast: {}", message);
    show_toast(store, ToastKind::Error, message);
}

/// Renders the toast stack
#[component]
pub fn ToastHost() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-host">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        ToastKind::Success => "toast success",
                        ToastKind::Error => "toast error",
                    };
                    view! {
                        <div class=class role="status" on:click=move |_| store_dismiss_toast(&store, id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
