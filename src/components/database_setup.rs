//! Setup and loading screens shown before the app proper.

use boltflow_core::config::{ANON_KEY_VAR, URL_VAR};
use leptos::prelude::*;

/// Shown when the backend URL or key is missing or still a placeholder
#[component]
pub fn DatabaseSetup() -> impl IntoView {
    view! {
        <div class="setup-screen">
            <div class="setup-card">
                <h1>"Database Setup Required"</h1>
                <p class="setup-lead">
                    "To use authentication and task management features, connect BoltFlow to a Supabase project."
                </p>
                <p>"Set these variables when building the app, then reload:"</p>
                <ul class="setup-vars">
                    <li><code>{URL_VAR}</code></li>
                    <li><code>{ANON_KEY_VAR}</code></li>
                </ul>
                <ul class="setup-features">
                    <li>"User Authentication" <span class="pending">"Pending Setup"</span></li>
                    <li>"Task Management" <span class="pending">"Pending Setup"</span></li>
                    <li>"Profile Management" <span class="pending">"Pending Setup"</span></li>
                </ul>
            </div>
        </div>
    }
}

#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="spinner"></div>
            <p>"Loading..."</p>
        </div>
    }
}
