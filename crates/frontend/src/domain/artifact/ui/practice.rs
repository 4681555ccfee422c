//! Practice problem block produced by `[PRACTICE:difficulty:problem]`.

use leptos::prelude::*;

#[component]
pub fn PracticeView(difficulty: String, problem: String) -> impl IntoView {
    let workspace_open = RwSignal::new(false);

    view! {
        <div class="practice-view">
            <div class="practice-header">
                <span class="practice-label">"Practice"</span>
                <span class=format!("practice-difficulty {}", difficulty.to_lowercase())>
                    {difficulty.clone()}
                </span>
            </div>
            <div class="practice-problem">{problem}</div>
            <button
                class="practice-workspace-toggle"
                on:click=move |_| workspace_open.update(|open| *open = !*open)
            >
                {move || if workspace_open.get() { "Hide workspace" } else { "Show workspace" }}
            </button>
            <Show when=move || workspace_open.get()>
                <textarea
                    class="practice-workspace"
                    placeholder="Work it out here..."
                ></textarea>
            </Show>
        </div>
    }
}
