//! Client-side chat model, mirrored to localStorage.

use contracts::domain::chat::MessageRole;
use serde::{Deserialize, Serialize};

use crate::domain::artifact::pipeline::Segment;
use crate::shared::time::now_ms;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub segments: Vec<Segment>,
    pub timestamp_ms: i64,
}

impl Message {
    pub fn text(role: MessageRole, content: impl Into<String>) -> Self {
        Message {
            role,
            segments: vec![Segment::Text(content.into())],
            timestamp_ms: now_ms(),
        }
    }

    pub fn from_segments(role: MessageRole, segments: Vec<Segment>) -> Self {
        Message {
            role,
            segments,
            timestamp_ms: now_ms(),
        }
    }

    /// Plain-text projection, used for titles and entry history.
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub title: String,
    /// Backend session id, assigned on first contact.
    pub session_id: Option<String>,
    pub messages: Vec<Message>,
    pub created_at_ms: i64,
    pub last_active_ms: i64,
}

impl Chat {
    pub fn new() -> Self {
        let now = now_ms();
        Chat {
            id: uuid::Uuid::new_v4().to_string(),
            title: "New chat".to_string(),
            session_id: None,
            messages: Vec::new(),
            created_at_ms: now,
            last_active_ms: now,
        }
    }
}

const TITLE_MAX_CHARS: usize = 40;

/// Chat title derived from the first user message.
pub fn derive_title(first_message: &str) -> String {
    let trimmed = first_message.trim().replace('\n', " ");
    if trimmed.is_empty() {
        return "New chat".to_string();
    }
    if trimmed.chars().count() <= TITLE_MAX_CHARS {
        return trimmed;
    }
    let cut: String = trimmed.chars().take(TITLE_MAX_CHARS).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_truncated_with_ellipsis() {
        assert_eq!(derive_title("short question"), "short question");
        let long = "please plot the function x squared over the interval minus five to five";
        let title = derive_title(long);
        assert!(title.ends_with('…'));
        assert!(title.chars().count() <= TITLE_MAX_CHARS + 1);
    }

    #[test]
    fn empty_input_gets_default_title() {
        assert_eq!(derive_title("   \n"), "New chat");
    }

    #[test]
    fn plain_text_skips_non_text_segments() {
        let msg = Message {
            role: MessageRole::Assistant,
            segments: vec![
                Segment::Text("a ".to_string()),
                Segment::Command(crate::shared::markup::InlineCommand::Practice {
                    difficulty: "easy".to_string(),
                    problem: "p".to_string(),
                }),
                Segment::Text("b".to_string()),
            ],
            timestamp_ms: 0,
        };
        assert_eq!(msg.plain_text(), "a b");
    }
}
