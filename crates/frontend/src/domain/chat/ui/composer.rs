//! Message composer.
//!
//! Enter sends, Shift+Enter inserts a newline. ArrowUp/ArrowDown walk the
//! persisted entry history when the draft is untouched. The whole control
//! is disabled while a response is streaming.

use leptos::prelude::*;

use crate::domain::chat::store::use_chats;

#[component]
pub fn Composer(on_send: Callback<String>) -> impl IntoView {
    let store = use_chats();
    let draft = RwSignal::new(String::new());
    // Position inside entry_history while browsing; None = live draft.
    let history_pos = RwSignal::new(Option::<usize>::None);

    let submit = move || {
        let text = draft.get_untracked().trim().to_string();
        if text.is_empty() || store.streaming.get_untracked() {
            return;
        }
        store.record_entry(&text);
        draft.set(String::new());
        history_pos.set(None);
        on_send.run(text);
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        match ev.key().as_str() {
            "Enter" if !ev.shift_key() => {
                ev.prevent_default();
                submit();
            }
            "ArrowUp" => {
                let history = store.entry_history.get_untracked();
                if history.is_empty() {
                    return;
                }
                let next = match history_pos.get_untracked() {
                    None => history.len() - 1,
                    Some(0) => 0,
                    Some(i) => i - 1,
                };
                ev.prevent_default();
                history_pos.set(Some(next));
                draft.set(history[next].clone());
            }
            "ArrowDown" => {
                let history = store.entry_history.get_untracked();
                let Some(pos) = history_pos.get_untracked() else {
                    return;
                };
                ev.prevent_default();
                if pos + 1 < history.len() {
                    history_pos.set(Some(pos + 1));
                    draft.set(history[pos + 1].clone());
                } else {
                    // Walked past the newest entry: back to an empty draft.
                    history_pos.set(None);
                    draft.set(String::new());
                }
            }
            _ => {
                // Any ordinary edit leaves history-browsing mode.
                history_pos.set(None);
            }
        }
    };

    view! {
        <div class="composer">
            <textarea
                class="composer-input"
                placeholder="Ask a math question..."
                rows=2
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
                on:keydown=on_keydown
                disabled=move || store.streaming.get()
            ></textarea>
            <button
                class="composer-send"
                title="Send"
                on:click=move |_| submit()
                disabled=move || store.streaming.get()
            >
                {crate::shared::icons::icon("send")}
            </button>
        </div>
    }
}
