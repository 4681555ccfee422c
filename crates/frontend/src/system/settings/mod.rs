//! User settings: a small persisted context plus the settings dialog.

use contracts::system::admin::{AdminStats, HealthResponse};
use contracts::system::auth::UpdateProfileRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::storage;
use crate::shared::theme::{use_theme, Theme};
use crate::shared::toast::use_toasts;
use crate::system::admin;
use crate::system::auth::{api as auth_api, context::use_auth};

const INSTANT_TYPING_KEY: &str = "tutor-instant-typing";

#[derive(Clone, Copy)]
pub struct SettingsContext {
    /// Skip the typewriter and show responses at once.
    pub instant_typing: RwSignal<bool>,
}

impl SettingsContext {
    pub fn set_instant_typing(&self, value: bool) {
        self.instant_typing.set(value);
        storage::save(INSTANT_TYPING_KEY, &value);
    }
}

#[component]
pub fn SettingsProvider(children: Children) -> impl IntoView {
    let instant = storage::load::<bool>(INSTANT_TYPING_KEY, i64::MAX).unwrap_or(false);
    provide_context(SettingsContext {
        instant_typing: RwSignal::new(instant),
    });
    children()
}

pub fn use_settings() -> SettingsContext {
    use_context::<SettingsContext>()
        .expect("SettingsContext not found. Wrap the app in SettingsProvider.")
}

/// Modal settings dialog. `open` is owned by the layout context so the
/// header button can toggle it.
#[component]
pub fn SettingsDialog(open: RwSignal<bool>) -> impl IntoView {
    let settings = use_settings();
    let theme_ctx = use_theme();
    let auth = use_auth();
    let toasts = use_toasts();

    let health = RwSignal::new(Option::<Result<HealthResponse, String>>::None);
    let admin_stats = RwSignal::new(Option::<AdminStats>::None);

    // Refresh the health readout (and admin stats) each time the dialog
    // opens.
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        spawn_local(async move {
            health.set(Some(admin::health().await));
        });
        if auth.is_admin() {
            if let Some(token) = auth.access_token() {
                spawn_local(async move {
                    match admin::stats(&token).await {
                        Ok(stats) => admin_stats.set(Some(stats)),
                        Err(err) => log::warn!("admin stats failed: {}", err),
                    }
                });
            }
        }
    });

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let current_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());

    let save_profile = move |_| {
        let Some(token) = auth.access_token() else {
            return;
        };
        let request = UpdateProfileRequest {
            full_name: (!full_name.get_untracked().trim().is_empty())
                .then(|| full_name.get_untracked().trim().to_string()),
            email: (!email.get_untracked().trim().is_empty())
                .then(|| email.get_untracked().trim().to_string()),
        };
        spawn_local(async move {
            match auth_api::update_profile(&token, request).await {
                Ok(user) => {
                    auth.set_user_info(user);
                    toasts.success("Profile updated.");
                }
                Err(err) => toasts.error(err),
            }
        });
    };

    let save_password = move |_| {
        let Some(token) = auth.access_token() else {
            return;
        };
        let current = current_password.get_untracked();
        let new = new_password.get_untracked();
        if current.is_empty() || new.is_empty() {
            toasts.error("Fill in both password fields.");
            return;
        }
        spawn_local(async move {
            match auth_api::change_password(&token, current, new).await {
                Ok(()) => {
                    current_password.set(String::new());
                    new_password.set(String::new());
                    toasts.success("Password changed.");
                }
                Err(err) => toasts.error(err),
            }
        });
    };

    let run_sync = move |_| {
        let Some(token) = auth.access_token() else {
            return;
        };
        spawn_local(async move {
            match admin::sync(&token).await {
                Ok(result) if result.synced => toasts.success("Backend state synced."),
                Ok(result) => toasts.error(result.detail.unwrap_or_else(|| "Sync refused.".into())),
                Err(err) => toasts.error(err),
            }
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| open.set(false)>
                <div class="dialog" on:click=|ev| ev.stop_propagation()>
                    <div class="dialog-header">
                        <h2>"Settings"</h2>
                        <button class="dialog-close" on:click=move |_| open.set(false)>
                            {crate::shared::icons::icon("close")}
                        </button>
                    </div>

                    <section class="settings-section">
                        <h3>"Appearance"</h3>
                        <label class="settings-row">
                            <span>"Light theme"</span>
                            <input
                                type="checkbox"
                                prop:checked=move || theme_ctx.theme.get() == Theme::Light
                                on:change=move |ev| {
                                    let light = event_target_checked(&ev);
                                    theme_ctx.set_theme(if light { Theme::Light } else { Theme::Dark });
                                }
                            />
                        </label>
                        <label class="settings-row">
                            <span>"Show responses instantly"</span>
                            <input
                                type="checkbox"
                                prop:checked=move || settings.instant_typing.get()
                                on:change=move |ev| {
                                    settings.set_instant_typing(event_target_checked(&ev));
                                }
                            />
                        </label>
                    </section>

                    <section class="settings-section">
                        <h3>"Profile"</h3>
                        <div class="form-group">
                            <input
                                type="text"
                                placeholder="Full name"
                                prop:value=move || full_name.get()
                                on:input=move |ev| full_name.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <input
                                type="email"
                                placeholder="Email"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />
                        </div>
                        <button class="btn-secondary" on:click=save_profile>"Save profile"</button>
                    </section>

                    <section class="settings-section">
                        <h3>"Password"</h3>
                        <div class="form-group">
                            <input
                                type="password"
                                placeholder="Current password"
                                prop:value=move || current_password.get()
                                on:input=move |ev| current_password.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <input
                                type="password"
                                placeholder="New password"
                                prop:value=move || new_password.get()
                                on:input=move |ev| new_password.set(event_target_value(&ev))
                            />
                        </div>
                        <button class="btn-secondary" on:click=save_password>"Change password"</button>
                    </section>

                    <section class="settings-section">
                        <h3>"Backend"</h3>
                        <div class="settings-row">
                            {move || match health.get() {
                                None => "Checking...".to_string(),
                                Some(Ok(h)) => {
                                    format!("{} ({} active sessions)", h.status, h.active_sessions)
                                }
                                Some(Err(_)) => "unreachable".to_string(),
                            }}
                        </div>
                    </section>

                    <Show when=move || auth.is_admin()>
                        <section class="settings-section">
                            <h3>"Administration"</h3>
                            {move || admin_stats.get().map(|stats| view! {
                                <ul class="admin-stats">
                                    <li>{format!("Users: {}", stats.total_users)}</li>
                                    <li>{format!("Active sessions: {}", stats.active_sessions)}</li>
                                    <li>{format!("Messages: {}", stats.total_messages)}</li>
                                    <li>{format!("Artifacts created: {}", stats.artifacts_created)}</li>
                                </ul>
                            })}
                            <button class="btn-secondary" on:click=run_sync>"Sync state"</button>
                        </section>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
