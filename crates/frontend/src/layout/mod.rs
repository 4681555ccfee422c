pub mod global_context;
pub mod left;
pub mod top;

use leptos::prelude::*;
use top::header::TopHeader;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |               TopHeader                  |
/// +------------------------------------------+
/// |  Sidebar  |           Content            |
/// |  (Left)   |          (Center)            |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <TopHeader />

            <div class="app-body">
                // Sidebar visibility is controlled by AppGlobalContext.
                <left::Left>
                    {left()}
                </left::Left>

                <div class="app-main">
                    {center()}
                </div>
            </div>
        </div>
    }
}
