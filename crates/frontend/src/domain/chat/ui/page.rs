//! The chat page: transcript, live stream, composer.
//!
//! Send flow: the user message is committed immediately, the backend
//! responds with the full text, every `<artifact>` block is registered
//! and swapped for a placeholder token, and the result is revealed by
//! the typewriter. Inline commands and placeholders take effect the
//! moment their closing delimiter is typed.

use contracts::domain::chat::MessageRole;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::artifact::{self, pipeline};
use crate::domain::chat::api;
use crate::domain::chat::errors;
use crate::domain::chat::model::Message;
use crate::domain::chat::store::use_chats;
use crate::domain::chat::stream::{base_delay_ms, jittered_delay_ms, StreamState};
use crate::domain::chat::ui::composer::Composer;
use crate::domain::chat::ui::message::{MessageView, SegmentsView};
use crate::system::settings::use_settings;

#[component]
pub fn ChatPage() -> impl IntoView {
    let store = use_chats();
    let settings = use_settings();
    // The in-flight assistant reply; None between responses.
    let live: RwSignal<Option<StreamState>> = RwSignal::new(None);
    let transcript_ref = NodeRef::<leptos::html::Div>::new();

    // Follow the bottom of the transcript as content arrives.
    Effect::new(move |_| {
        store.chats.track();
        live.track();
        if let Some(el) = transcript_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let send = Callback::new(move |input: String| {
        let chat_id = match store.active_id.get_untracked() {
            Some(id) => id,
            None => store.new_chat(),
        };
        store.push_message(&chat_id, Message::text(MessageRole::User, input.clone()));
        store.streaming.set(true);

        spawn_local(async move {
            // Revalidate the stored session first; the backend may have
            // evicted it and handed out a replacement id.
            let session_id = match store.session_id_of(&chat_id) {
                Some(sid) => match api::ensure_session(&sid).await {
                    Ok(valid) => {
                        if valid != sid {
                            store.set_session_id(&chat_id, valid.clone());
                        }
                        Some(valid)
                    }
                    Err(err) => {
                        log::warn!("session revalidation failed: {}", err);
                        Some(sid)
                    }
                },
                None => None,
            };
            let (text, pending) = match api::send_message(input, session_id).await {
                Ok(resp) => {
                    store.set_session_id(&chat_id, resp.session_id.clone());
                    let session = resp.session_id;
                    pipeline::process_response(&resp.response, move |spec| {
                        artifact::api::create_artifact(spec, session.clone())
                    })
                    .await
                }
                Err(err) => {
                    log::error!("chat send failed: {}", err);
                    let kind = errors::classify(&err);
                    (errors::synthesized_message(kind).to_string(), Vec::new())
                }
            };

            let mut state = StreamState::new(pending);
            let instant = settings.instant_typing.get_untracked();
            for c in text.chars() {
                state.push_char(c);
                live.set(Some(state.clone()));
                if !instant {
                    let delay = jittered_delay_ms(base_delay_ms(c), js_sys::Math::random());
                    TimeoutFuture::new(delay).await;
                }
            }
            state.finish();
            store.push_message(
                &chat_id,
                Message::from_segments(MessageRole::Assistant, state.segments().to_vec()),
            );
            live.set(None);
            store.streaming.set(false);
        });
    });

    let messages = Memo::new(move |_| {
        store
            .active_chat()
            .map(|chat| chat.messages)
            .unwrap_or_default()
    });

    view! {
        <div class="chat-page">
            <div class="chat-transcript" node_ref=transcript_ref>
                <Show when=move || { !messages.get().is_empty() || live.get().is_some() }
                    fallback=|| view! {
                        <div class="chat-empty">
                            <p>"Ask me anything about mathematics."</p>
                            <p class="chat-empty-hint">
                                "Try: \"Plot x^2 - 4 between -5 and 5\" or \"Walk me through solving 2x + 3 = 11\""
                            </p>
                        </div>
                    }
                >
                    <For
                        each=move || { messages.get().into_iter().enumerate().collect::<Vec<_>>() }
                        key=|(i, m)| (*i, m.timestamp_ms)
                        children=move |(_, message)| view! { <MessageView message=message /> }
                    />
                    <Show when=move || live.get().is_some()>
                        <div class="message message-assistant message-streaming">
                            <div class="message-body">
                                {move || {
                                    live.get().map(|state| view! {
                                        <SegmentsView segments=state.segments().to_vec() />
                                        <span class="message-text">
                                            {state.visible_buffer().to_string()}
                                        </span>
                                        <span class="typing-caret">"▋"</span>
                                    })
                                }}
                            </div>
                        </div>
                    </Show>
                </Show>
            </div>
            <Composer on_send=send />
        </div>
    }
}
