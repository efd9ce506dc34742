//! Login Form Component
//!
//! Sign in, sign up and password reset on one card.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::toast::{toast_error, toast_success};
use crate::context::use_app_context;
use crate::models::SignUpOutcome;
use crate::store::use_app_store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginMode {
    SignIn,
    SignUp,
    ForgotPassword,
}

impl LoginMode {
    fn heading(&self) -> &'static str {
        match self {
            LoginMode::SignIn => "Welcome back",
            LoginMode::SignUp => "Create your account",
            LoginMode::ForgotPassword => "Reset your password",
        }
    }

    fn subtitle(&self) -> &'static str {
        match self {
            LoginMode::SignIn => "Sign in to your account",
            LoginMode::SignUp => "Start your productivity journey",
            LoginMode::ForgotPassword => "Enter your email to receive a password reset link",
        }
    }

    fn submit_label(&self, busy: bool) -> &'static str {
        match (self, busy) {
            (LoginMode::SignIn, false) => "Sign In",
            (LoginMode::SignIn, true) => "Signing In...",
            (LoginMode::SignUp, false) => "Create Account",
            (LoginMode::SignUp, true) => "Creating Account...",
            (LoginMode::ForgotPassword, false) => "Send Reset Email",
            (LoginMode::ForgotPassword, true) => "Sending Reset Email...",
        }
    }

    fn switch_label(&self) -> &'static str {
        match self {
            LoginMode::SignIn => "Don't have an account? Sign up",
            LoginMode::SignUp => "Already have an account? Sign in",
            LoginMode::ForgotPassword => "Back to sign in",
        }
    }

    /// Target of the bottom link
    fn switched(&self) -> LoginMode {
        match self {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp | LoginMode::ForgotPassword => LoginMode::SignIn,
        }
    }
}

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (mode, set_mode) = signal(LoginMode::SignIn);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let clear_fields = move || {
        set_email.set(String::new());
        set_password.set(String::new());
        set_name.set(String::new());
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let current = mode.get();
        let (email, password, name) = (email.get(), password.get(), name.get());

        set_busy.set(true);
        spawn_local(async move {
            match current {
                LoginMode::SignIn => {
                    if let Err(e) = commands::sign_in(ctx, email, password).await {
                        toast_error(store, e);
                    }
                }
                LoginMode::SignUp => match commands::sign_up(ctx, email, password, name).await {
                    Ok(SignUpOutcome::ConfirmationPending(_)) => {
                        toast_success(
                            store,
                            "Account created successfully! Please check your email to verify your account.",
                        );
                        clear_fields();
                        set_mode.set(LoginMode::SignIn);
                    }
                    Ok(SignUpOutcome::SignedIn(_)) => toast_success(store, "Account created successfully!"),
                    Err(e) => toast_error(store, e),
                },
                LoginMode::ForgotPassword => match commands::request_password_reset(ctx, email).await {
                    Ok(()) => {
                        toast_success(store, "Password reset email sent! Check your inbox.");
                        clear_fields();
                        set_mode.set(LoginMode::SignIn);
                    }
                    Err(e) => toast_error(store, e),
                },
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="auth-screen">
            <div class="auth-brand">
                <span class="brand-mark">"☑"</span>
                <span class="brand-name">"BoltFlow"</span>
            </div>
            <h2>{move || mode.get().heading()}</h2>
            <p class="subtitle">{move || mode.get().subtitle()}</p>

            <form class="auth-card" on:submit=submit>
                <Show when=move || mode.get() == LoginMode::SignUp>
                    <label for="name">"Full Name"</label>
                    <input
                        id="name"
                        type="text"
                        placeholder="Enter your name"
                        required
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </Show>

                <label for="email">"Email Address"</label>
                <input
                    id="email"
                    type="email"
                    placeholder="Enter your email"
                    required
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />

                <Show when=move || mode.get() != LoginMode::ForgotPassword>
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        placeholder="Enter your password"
                        required
                        minlength="6"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </Show>

                <button type="submit" class="primary-btn" disabled=move || busy.get()>
                    {move || mode.get().submit_label(busy.get())}
                </button>
            </form>

            <div class="auth-links">
                <Show when=move || mode.get() == LoginMode::SignIn>
                    <button class="link-btn" on:click=move |_| set_mode.set(LoginMode::ForgotPassword)>
                        "Forgot your password?"
                    </button>
                </Show>
                <button
                    class="link-btn"
                    on:click=move |_| {
                        set_mode.update(|m| *m = m.switched());
                        clear_fields();
                    }
                >
                    {move || mode.get().switch_label()}
                </button>
            </div>
        </div>
    }
}
