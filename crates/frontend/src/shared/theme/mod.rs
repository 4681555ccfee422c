//! Theme context: dark/light, persisted, applied as a `data-theme`
//! attribute on `<body>`.

use leptos::prelude::*;

use crate::shared::storage;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

const THEME_STORAGE_KEY: &str = "tutor-theme";

fn apply_theme(theme: Theme) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let _ = body.set_attribute("data-theme", theme.as_str());
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<Theme>,
}

impl ThemeContext {
    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        storage::save(THEME_STORAGE_KEY, &theme.as_str().to_string());
        apply_theme(theme);
    }

    pub fn toggle(&self) {
        let next = match self.theme.get() {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        self.set_theme(next);
    }
}

#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let initial = storage::load::<String>(THEME_STORAGE_KEY, i64::MAX)
        .map(|s| Theme::from_str(&s))
        .unwrap_or_default();
    apply_theme(initial);

    let context = ThemeContext {
        theme: RwSignal::new(initial),
    };
    provide_context(context);

    children()
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found. Wrap the app in ThemeProvider.")
}

/// Header button cycling between the two themes.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = use_theme();
    view! {
        <button
            class="header-icon-btn"
            title="Toggle theme"
            on:click=move |_| ctx.toggle()
        >
            {move || match ctx.theme.get() {
                Theme::Dark => crate::shared::icons::icon("sun"),
                Theme::Light => crate::shared::icons::icon("moon"),
            }}
        </button>
    }
}
