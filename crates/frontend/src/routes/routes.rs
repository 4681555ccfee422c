use leptos::prelude::*;

use crate::domain::chat::store::use_chats;
use crate::domain::chat::ui::page::ChatPage;
use crate::layout::global_context::use_layout;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::auth::ui::login::LoginPage;
use crate::system::settings::SettingsDialog;

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_layout();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <ChatPage /> }.into_any()
        />
        <SettingsDialog open=ctx.settings_open />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let auth = use_auth();
    let store = use_chats();

    // Swap the per-user chat snapshot in and out as auth state settles.
    Effect::new(move |_| match auth.username() {
        Some(username) => store.load_for_user(&username),
        None => store.unload(),
    });

    view! {
        <Show
            when=move || !auth.restoring.get()
            fallback=|| view! { <div class="app-splash">"Loading..."</div> }
        >
            <Show
                when=move || auth.is_authenticated()
                fallback=|| view! { <LoginPage /> }
            >
                <MainLayout />
            </Show>
        </Show>
    }
}
