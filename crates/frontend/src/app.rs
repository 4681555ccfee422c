use leptos::prelude::*;

use crate::domain::chat::store::ChatStore;
use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::theme::ThemeProvider;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::AuthProvider;
use crate::system::settings::SettingsProvider;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(ToastService::new());
    provide_context(ChatStore::new());

    view! {
        <ThemeProvider>
            <SettingsProvider>
                <AuthProvider>
                    <AppRoutes />
                    <ToastHost />
                </AuthProvider>
            </SettingsProvider>
        </ThemeProvider>
    }
}
