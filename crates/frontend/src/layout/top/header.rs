//! Application top bar: sidebar toggle, title, backend health dot,
//! theme toggle, settings, user info and logout.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::chat::store::use_chats;
use crate::layout::global_context::use_layout;
use crate::shared::icons::icon;
use crate::shared::theme::ThemeToggle;
use crate::system::admin;
use crate::system::auth::context::use_auth;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_layout();
    let auth = use_auth();
    let store = use_chats();

    // None = still checking, Some(true/false) = backend up/down.
    let backend_up = RwSignal::new(Option::<bool>::None);
    Effect::new(move |_| {
        spawn_local(async move {
            backend_up.set(Some(admin::health().await.is_ok()));
        });
    });

    let logout = move |_| {
        store.unload();
        auth.logout();
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="header-icon-btn"
                    title="Toggle sidebar"
                    on:click=move |_| ctx.toggle_sidebar()
                >
                    {icon("sidebar")}
                </button>
                <span class="top-header__title">"Math Tutor"</span>
                <span
                    class=move || match backend_up.get() {
                        None => "health-dot health-dot--unknown",
                        Some(true) => "health-dot health-dot--up",
                        Some(false) => "health-dot health-dot--down",
                    }
                    title=move || match backend_up.get() {
                        None => "Checking backend...",
                        Some(true) => "Backend online",
                        Some(false) => "Backend unreachable",
                    }
                ></span>
            </div>

            <div class="top-header__actions">
                <ThemeToggle />

                <button
                    class="header-icon-btn"
                    title="Settings"
                    on:click=move |_| ctx.settings_open.set(true)
                >
                    {icon("gear")}
                </button>

                <div class="top-header__user">
                    {icon("user")}
                    <span>{move || auth.username().unwrap_or_default()}</span>
                </div>

                <button class="header-icon-btn" title="Sign out" on:click=logout>
                    "Sign out"
                </button>
            </div>
        </div>
    }
}
