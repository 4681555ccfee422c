//! Login page: sign-in and sign-up tabs plus a forgot-password form.

use contracts::system::auth::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::toast::use_toasts;
use crate::system::auth::{api, context::use_auth};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    SignIn,
    SignUp,
    ForgotPassword,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    let mode = RwSignal::new(Mode::SignIn);
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let reset_token = RwSignal::new(String::new());
    let reset_password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    let switch_mode = move |next: Mode| {
        mode.set(next);
        error_message.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        is_loading.set(true);
        error_message.set(None);

        let current_mode = mode.get_untracked();
        let username_val = username.get_untracked();
        let password_val = password.get_untracked();
        let email_val = email.get_untracked();
        let full_name_val = full_name.get_untracked();

        spawn_local(async move {
            let result = match current_mode {
                Mode::SignIn => api::login(username_val, password_val)
                    .await
                    .map(|response| auth.adopt_session(response)),
                Mode::SignUp => {
                    let request = RegisterRequest {
                        username: username_val,
                        email: email_val,
                        password: password_val,
                        full_name: (!full_name_val.trim().is_empty())
                            .then(|| full_name_val.trim().to_string()),
                    };
                    api::register(request)
                        .await
                        .map(|response| auth.adopt_session(response))
                }
                Mode::ForgotPassword => {
                    api::request_password_reset(email_val).await.map(|_| {
                        toasts.success("If that address is registered, a reset link is on its way.");
                        mode.set(Mode::SignIn);
                    })
                }
            };

            if let Err(err) = result {
                error_message.set(Some(err));
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Math Tutor"</h1>

                <div class="login-tabs">
                    <button
                        class=move || if mode.get() == Mode::SignIn { "tab tab-active" } else { "tab" }
                        on:click=move |_| switch_mode(Mode::SignIn)
                    >
                        "Sign in"
                    </button>
                    <button
                        class=move || if mode.get() == Mode::SignUp { "tab tab-active" } else { "tab" }
                        on:click=move |_| switch_mode(Mode::SignUp)
                    >
                        "Create account"
                    </button>
                </div>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <Show when=move || mode.get() != Mode::ForgotPassword>
                        <div class="form-group">
                            <label for="username">"Username"</label>
                            <input
                                type="text"
                                id="username"
                                prop:value=move || username.get()
                                on:input=move |ev| username.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>
                    </Show>

                    <Show when=move || mode.get() != Mode::SignIn>
                        <div class="form-group">
                            <label for="email">"Email"</label>
                            <input
                                type="email"
                                id="email"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>
                    </Show>

                    <Show when=move || mode.get() == Mode::SignUp>
                        <div class="form-group">
                            <label for="full-name">"Full name (optional)"</label>
                            <input
                                type="text"
                                id="full-name"
                                prop:value=move || full_name.get()
                                on:input=move |ev| full_name.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                    </Show>

                    <Show when=move || mode.get() != Mode::ForgotPassword>
                        <div class="form-group">
                            <label for="password">"Password"</label>
                            <input
                                type="password"
                                id="password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>
                    </Show>

                    <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                        {move || match (mode.get(), is_loading.get()) {
                            (_, true) => "Working...",
                            (Mode::SignIn, _) => "Sign in",
                            (Mode::SignUp, _) => "Create account",
                            (Mode::ForgotPassword, _) => "Send reset link",
                        }}
                    </button>
                </form>

                <Show when=move || mode.get() == Mode::SignIn>
                    <button
                        class="btn-link"
                        on:click=move |_| switch_mode(Mode::ForgotPassword)
                    >
                        "Forgot password?"
                    </button>
                </Show>
                <Show when=move || mode.get() == Mode::ForgotPassword>
                    <div class="reset-confirm">
                        <p>"Already have a reset code?"</p>
                        <div class="form-group">
                            <input
                                type="text"
                                placeholder="Reset code"
                                prop:value=move || reset_token.get()
                                on:input=move |ev| reset_token.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <input
                                type="password"
                                placeholder="New password"
                                prop:value=move || reset_password.get()
                                on:input=move |ev| reset_password.set(event_target_value(&ev))
                            />
                        </div>
                        <button
                            class="btn-secondary"
                            disabled=move || is_loading.get()
                            on:click=move |_| {
                                let token = reset_token.get_untracked();
                                let new_password = reset_password.get_untracked();
                                if token.trim().is_empty() || new_password.is_empty() {
                                    error_message.set(Some(
                                        "Enter the reset code and a new password.".to_string(),
                                    ));
                                    return;
                                }
                                is_loading.set(true);
                                spawn_local(async move {
                                    match api::confirm_password_reset(token, new_password).await {
                                        Ok(()) => {
                                            toasts.success("Password updated. Sign in with it now.");
                                            mode.set(Mode::SignIn);
                                        }
                                        Err(err) => error_message.set(Some(err)),
                                    }
                                    is_loading.set(false);
                                });
                            }
                        >
                            "Set new password"
                        </button>
                    </div>
                    <button class="btn-link" on:click=move |_| switch_mode(Mode::SignIn)>
                        "Back to sign in"
                    </button>
                </Show>
            </div>
        </div>
    }
}
