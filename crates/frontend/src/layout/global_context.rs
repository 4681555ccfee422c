use leptos::prelude::*;

/// App-wide layout state, provided once at the root.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub sidebar_open: RwSignal<bool>,
    pub settings_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            sidebar_open: RwSignal::new(true),
            settings_open: RwSignal::new(false),
        }
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_open.update(|open| *open = !*open);
    }
}

pub fn use_layout() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext context not found")
}
