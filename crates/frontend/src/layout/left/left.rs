use leptos::prelude::*;

use crate::layout::global_context::use_layout;

/// Sidebar container; visibility comes from the layout context.
#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = use_layout();

    view! {
        <aside class=move || {
            if ctx.sidebar_open.get() {
                "app-sidebar"
            } else {
                "app-sidebar app-sidebar--hidden"
            }
        }>
            {children()}
        </aside>
    }
}
