//! Profile Form Component
//!
//! Read-only email, editable name and an optional password change.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::toast::{toast_error, toast_success};
use crate::context::use_app_context;
use crate::models::ProfileUpdate;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ProfileForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let identity = move || store.identity().get();
    let (name, set_name) = signal(
        store
            .identity()
            .with_untracked(|i| i.as_ref().and_then(|i| i.name.clone()).unwrap_or_default()),
    );
    let (password, set_password) = signal(String::new());
    let (confirmation, set_confirmation) = signal(String::new());
    let (saving, set_saving) = signal(false);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get() {
            return;
        }
        let mut update = ProfileUpdate::default().name(name.get());
        if !password.get().is_empty() {
            update = update.password(password.get(), confirmation.get());
        }

        set_saving.set(true);
        spawn_local(async move {
            match commands::update_profile(ctx, update).await {
                Ok(_) => {
                    toast_success(store, "Profile updated successfully");
                    set_password.set(String::new());
                    set_confirmation.set(String::new());
                }
                Err(e) => toast_error(store, e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <section class="profile-page">
            <div class="profile-header">
                <div class="avatar large">{move || identity().map(|i| i.initials()).unwrap_or_default()}</div>
                <h2>{move || identity().map(|i| i.display_name()).unwrap_or_default()}</h2>
                <h1>"Profile Settings"</h1>
                <p class="subtitle">"Update your name and password"</p>
            </div>

            <form class="profile-card" on:submit=save>
                <label for="profile-email">"Email Address"</label>
                <input
                    id="profile-email"
                    type="email"
                    disabled
                    prop:value=move || identity().map(|i| i.email).unwrap_or_default()
                />
                <p class="hint">"Email cannot be changed"</p>

                <label for="profile-name">"Full Name"</label>
                <input
                    id="profile-name"
                    type="text"
                    placeholder="Enter your name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />

                <h3>"Change Password"</h3>
                <p class="hint">"Leave blank to keep your current password"</p>

                <label for="profile-password">"New Password"</label>
                <input
                    id="profile-password"
                    type="password"
                    placeholder="Enter new password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                <label for="profile-confirm">"Confirm New Password"</label>
                <input
                    id="profile-confirm"
                    type="password"
                    placeholder="Confirm new password"
                    prop:value=move || confirmation.get()
                    on:input=move |ev| set_confirmation.set(event_target_value(&ev))
                />

                <button type="submit" class="primary-btn" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                </button>
            </form>
        </section>
    }
}
