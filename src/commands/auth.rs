//! Auth Commands
//!
//! Frontend bindings for the session store.

use super::to_message;
use crate::context::AppContext;
use crate::models::{Identity, ProfileUpdate, SignUpOutcome};

/// Where the reset email should send the user back to
fn reset_redirect() -> Option<String> {
    let origin = web_sys::window()?.location().origin().ok()?;
    Some(format!("{}/reset-password", origin))
}

pub async fn sign_in(ctx: AppContext, email: String, password: String) -> Result<Identity, String> {
    ctx.session().sign_in(&email, &password).await.map_err(to_message)
}

pub async fn sign_up(ctx: AppContext, email: String, password: String, name: String) -> Result<SignUpOutcome, String> {
    ctx.session().sign_up(&email, &password, &name).await.map_err(to_message)
}

pub async fn sign_out(ctx: AppContext) {
    ctx.session().sign_out().await
}

pub async fn update_profile(ctx: AppContext, update: ProfileUpdate) -> Result<Identity, String> {
    ctx.session().update_profile(update).await.map_err(to_message)
}

pub async fn request_password_reset(ctx: AppContext, email: String) -> Result<(), String> {
    let redirect = reset_redirect();
    ctx.session()
        .request_password_reset(&email, redirect.as_deref())
        .await
        .map_err(to_message)
}
