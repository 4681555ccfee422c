//! Chat store: the in-memory chat map, mirrored to localStorage per user.
//!
//! Constructed once in `App` and provided through context (no globals);
//! every collaborator receives it explicitly via `use_chats()`.

use contracts::domain::chat::MessageRole;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::model::{derive_title, Chat, Message};
use crate::domain::artifact::pipeline::Segment;
use crate::shared::storage::{self, CONVERSATION_TTL_MS};
use crate::shared::time::now_ms;

fn chats_key(username: &str) -> String {
    format!("tutor-chats::{}", username)
}

fn entry_history_key(username: &str) -> String {
    format!("tutor-entry-history::{}", username)
}

const ENTRY_HISTORY_MAX: usize = 50;

#[derive(Clone, Copy)]
pub struct ChatStore {
    pub chats: RwSignal<Vec<Chat>>,
    pub active_id: RwSignal<Option<String>>,
    /// A stream is in flight; the composer is disabled while set.
    pub streaming: RwSignal<bool>,
    /// Previously sent inputs, newest last.
    pub entry_history: RwSignal<Vec<String>>,
    username: RwSignal<Option<String>>,
}

impl ChatStore {
    pub fn new() -> Self {
        ChatStore {
            chats: RwSignal::new(Vec::new()),
            active_id: RwSignal::new(None),
            streaming: RwSignal::new(false),
            entry_history: RwSignal::new(Vec::new()),
            username: RwSignal::new(None),
        }
    }

    /// Load the given user's snapshot; called when auth state settles.
    pub fn load_for_user(&self, username: &str) {
        self.username.set(Some(username.to_string()));
        let chats: Vec<Chat> =
            storage::load(&chats_key(username), CONVERSATION_TTL_MS).unwrap_or_default();
        let first = chats.first().map(|c| c.id.clone());
        self.chats.set(chats);
        self.active_id.set(first);
        let history: Vec<String> =
            storage::load(&entry_history_key(username), CONVERSATION_TTL_MS).unwrap_or_default();
        self.entry_history.set(history);
    }

    pub fn unload(&self) {
        self.username.set(None);
        self.chats.set(Vec::new());
        self.active_id.set(None);
        self.entry_history.set(Vec::new());
    }

    pub fn persist(&self) {
        let Some(username) = self.username.get_untracked() else {
            return;
        };
        self.chats
            .with_untracked(|chats| storage::save(&chats_key(&username), chats));
        self.entry_history
            .with_untracked(|h| storage::save(&entry_history_key(&username), h));
    }

    pub fn active_chat(&self) -> Option<Chat> {
        let id = self.active_id.get()?;
        self.chats.with(|chats| chats.iter().find(|c| c.id == id).cloned())
    }

    /// Create a chat and eagerly open its backend session; if that call
    /// fails the first send will get a session assigned instead.
    pub fn new_chat(&self) -> String {
        let chat = Chat::new();
        let id = chat.id.clone();
        self.chats.update(|chats| chats.insert(0, chat));
        self.active_id.set(Some(id.clone()));
        self.persist();

        let store = *self;
        let chat_id = id.clone();
        spawn_local(async move {
            match api::new_session().await {
                Ok(session_id) => store.set_session_id(&chat_id, session_id),
                Err(err) => log::warn!("eager session creation failed: {}", err),
            }
        });
        id
    }

    pub fn select(&self, id: &str) {
        self.active_id.set(Some(id.to_string()));
        self.resync_selected(id);
    }

    /// If the selected chat has a backend session but an empty local
    /// transcript (e.g. restored on another device), pull the history.
    fn resync_selected(&self, id: &str) {
        let (session_id, is_empty) = self.chats.with_untracked(|chats| {
            chats
                .iter()
                .find(|c| c.id == id)
                .map(|c| (c.session_id.clone(), c.messages.is_empty()))
                .unwrap_or((None, false))
        });
        let Some(session_id) = session_id else {
            return;
        };
        if !is_empty {
            return;
        }
        let store = *self;
        let chat_id = id.to_string();
        spawn_local(async move {
            match api::session_status(&session_id).await {
                Ok(status) if status.exists && status.message_count > 0 => {}
                Ok(_) => return,
                Err(err) => {
                    log::warn!("session status check failed: {}", err);
                    return;
                }
            }
            match api::history(&session_id).await {
                Ok(history) => {
                    store.chats.update(|chats| {
                        if let Some(chat) = chats.iter_mut().find(|c| c.id == chat_id) {
                            chat.messages = history
                                .messages
                                .into_iter()
                                .map(|m| Message {
                                    role: m.role,
                                    segments: vec![Segment::Text(m.content)],
                                    timestamp_ms: m.timestamp.timestamp_millis(),
                                })
                                .collect();
                        }
                    });
                    store.persist();
                }
                Err(err) => log::warn!("history resync failed: {}", err),
            }
        });
    }

    /// Delete server-side and client-side together.
    pub fn delete(&self, id: &str) {
        let session_id = self.chats.with_untracked(|chats| {
            chats
                .iter()
                .find(|c| c.id == id)
                .and_then(|c| c.session_id.clone())
        });
        self.chats.update(|chats| chats.retain(|c| c.id != id));
        if self.active_id.get_untracked().as_deref() == Some(id) {
            let next = self.chats.with_untracked(|chats| chats.first().map(|c| c.id.clone()));
            self.active_id.set(next);
        }
        self.persist();

        if let Some(session_id) = session_id {
            spawn_local(async move {
                if let Err(err) = api::delete_session(&session_id).await {
                    log::warn!("backend session delete failed: {}", err);
                }
            });
        }
    }

    /// Clear the transcript but keep the chat and its backend session.
    pub fn clear(&self, id: &str) {
        let session_id = self.chats.with_untracked(|chats| {
            chats
                .iter()
                .find(|c| c.id == id)
                .and_then(|c| c.session_id.clone())
        });
        self.chats.update(|chats| {
            if let Some(chat) = chats.iter_mut().find(|c| c.id == id) {
                chat.messages.clear();
                chat.last_active_ms = now_ms();
            }
        });
        self.persist();

        if let Some(session_id) = session_id {
            spawn_local(async move {
                if let Err(err) = api::clear_session(&session_id).await {
                    log::warn!("backend session clear failed: {}", err);
                }
            });
        }
    }

    pub fn push_message(&self, chat_id: &str, message: Message) {
        self.chats.update(|chats| {
            if let Some(chat) = chats.iter_mut().find(|c| c.id == chat_id) {
                if chat.messages.is_empty() && message.role == MessageRole::User {
                    chat.title = derive_title(&message.plain_text());
                }
                chat.messages.push(message);
                chat.last_active_ms = now_ms();
            }
        });
        self.persist();
    }

    pub fn set_session_id(&self, chat_id: &str, session_id: String) {
        self.chats.update(|chats| {
            if let Some(chat) = chats.iter_mut().find(|c| c.id == chat_id) {
                chat.session_id = Some(session_id);
            }
        });
        self.persist();
    }

    pub fn session_id_of(&self, chat_id: &str) -> Option<String> {
        self.chats.with_untracked(|chats| {
            chats
                .iter()
                .find(|c| c.id == chat_id)
                .and_then(|c| c.session_id.clone())
        })
    }

    pub fn record_entry(&self, input: &str) {
        self.entry_history.update(|history| {
            if history.last().map(|s| s.as_str()) != Some(input) {
                history.push(input.to_string());
                if history.len() > ENTRY_HISTORY_MAX {
                    let overflow = history.len() - ENTRY_HISTORY_MAX;
                    history.drain(..overflow);
                }
            }
        });
        self.persist();
    }
}

pub fn use_chats() -> ChatStore {
    use_context::<ChatStore>().expect("ChatStore not found. Provide it at the app root.")
}
