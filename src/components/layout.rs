//! Layout Component
//!
//! Header with navigation and the signed-in user, plus the current page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::toast::toast_success;
use crate::components::{ProfileForm, TaskPage};
use crate::context::use_app_context;
use crate::models::{Page, TaskFilter};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn Layout() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let display_name = move || store.identity().with(|i| i.as_ref().map(|i| i.display_name()).unwrap_or_default());
    let initials = move || store.identity().with(|i| i.as_ref().map(|i| i.initials()).unwrap_or_default());

    let sign_out = move |_| {
        spawn_local(async move {
            commands::sign_out(ctx).await;
            toast_success(store, "Signed out");
        });
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <button class="brand" on:click=move |_| ctx.navigate(Page::Dashboard)>
                    "☑ BoltFlow"
                </button>

                <nav class="main-nav">
                    {Page::NAV.iter().map(|&page| view! {
                        <button
                            class=move || if ctx.page.get() == page { "nav-tab active" } else { "nav-tab" }
                            on:click=move |_| ctx.navigate(page)
                        >
                            {page.label()}
                        </button>
                    }).collect_view()}
                </nav>

                <div class="user-menu">
                    <button class="user-chip" title="My Profile" on:click=move |_| ctx.navigate(Page::Profile)>
                        <span class="avatar">{initials}</span>
                        <span class="user-name">{display_name}</span>
                    </button>
                    <button class="sign-out-btn" on:click=sign_out>"Sign Out"</button>
                </div>
            </header>

            <main class="main-content">
                {move || match ctx.page.get() {
                    Page::Dashboard => view! { <TaskPage filter=TaskFilter::Active /> }.into_any(),
                    Page::Completed => view! { <TaskPage filter=TaskFilter::Completed /> }.into_any(),
                    Page::Profile => view! { <ProfileForm /> }.into_any(),
                }}
            </main>
        </div>
    }
}
