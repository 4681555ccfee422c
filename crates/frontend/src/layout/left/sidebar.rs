//! Chat list sidebar.

use leptos::prelude::*;

use crate::domain::chat::store::use_chats;
use crate::shared::icons::icon;
use crate::shared::time::{now_ms, relative_label};

#[component]
pub fn Sidebar() -> impl IntoView {
    let store = use_chats();

    view! {
        <div class="sidebar">
            <button class="sidebar-new-chat" on:click=move |_| { store.new_chat(); }>
                {icon("plus")}
                <span>"New chat"</span>
            </button>

            <div class="sidebar-chats">
                <For
                    each=move || store.chats.get()
                    key=|chat| chat.id.clone()
                    children=move |chat| {
                        let id = chat.id.clone();
                        let select_id = id.clone();
                        let delete_id = id.clone();
                        let last_active = chat.last_active_ms;
                        let is_active = Memo::new(move |_| {
                            store.active_id.get().as_deref() == Some(id.as_str())
                        });
                        view! {
                            <div
                                class=move || {
                                    if is_active.get() {
                                        "sidebar-chat sidebar-chat--active"
                                    } else {
                                        "sidebar-chat"
                                    }
                                }
                                on:click=move |_| store.select(&select_id)
                            >
                                <div class="sidebar-chat-title">{chat.title.clone()}</div>
                                <div class="sidebar-chat-meta">
                                    {relative_label(last_active, now_ms())}
                                </div>
                                <button
                                    class="sidebar-chat-delete"
                                    title="Delete chat"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        store.delete(&delete_id);
                                    }
                                >
                                    {icon("trash")}
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}
