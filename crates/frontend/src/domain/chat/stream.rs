//! Streaming typewriter.
//!
//! The assistant response is revealed one character at a time on the UI
//! thread (one timer await per character). After every appended character
//! the trailing buffer is rescanned; the moment a completed inline command
//! or placeholder token appears, it is committed as a segment and removed
//! from the buffer — so its side effects happen before the rest of the
//! message is typed, and committed text is never re-matched.

use crate::domain::artifact::pipeline::{push_text, PendingArtifact, Segment};
use crate::shared::markup::{self, TokenKind, ARTIFACT_OPEN};

/// Pure typewriter state: committed segments plus the text still being
/// typed. Kept free of DOM and timer concerns so it is testable on its
/// own; the driver in the chat page owns the delays.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamState {
    segments: Vec<Segment>,
    buffer: String,
    pending: Vec<PendingArtifact>,
    done: bool,
}

impl StreamState {
    pub fn new(pending: Vec<PendingArtifact>) -> Self {
        StreamState {
            segments: Vec::new(),
            buffer: String::new(),
            pending,
            done: false,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Append one character and commit any construct it completed.
    pub fn push_char(&mut self, c: char) {
        self.buffer.push(c);
        self.drain_completed();
    }

    /// Flush the remaining buffer as text and drop unconsumed pending
    /// artifacts (best-effort hand-off, logged).
    pub fn finish(&mut self) {
        let rest = std::mem::take(&mut self.buffer);
        push_text(&mut self.segments, &rest);
        for item in &self.pending {
            log::warn!(
                "artifact {} never surfaced in the streamed text",
                item.artifact_id
            );
        }
        self.pending.clear();
        self.done = true;
    }

    /// The typed text to display, hiding any trailing half-typed special
    /// construct (partial placeholder tokens would otherwise flash as
    /// garbage while being typed).
    pub fn visible_buffer(&self) -> &str {
        &self.buffer[..visible_len(&self.buffer)]
    }

    fn drain_completed(&mut self) {
        loop {
            let tokens = markup::tokenize(&self.buffer);
            let Some(first) = tokens.iter().position(|t| !t.is_text()) else {
                return;
            };

            for token in &tokens[..first] {
                push_text(&mut self.segments, &token.raw);
            }
            match &tokens[first].kind {
                TokenKind::Command(cmd) => self.segments.push(Segment::Command(cmd.clone())),
                TokenKind::Placeholder(key) => {
                    match self.pending.iter().position(|p| &p.key == key) {
                        Some(idx) => {
                            let item = self.pending.remove(idx);
                            self.segments.push(Segment::Artifact {
                                artifact_id: item.artifact_id,
                                spec: item.spec,
                            });
                        }
                        None => {
                            log::warn!("placeholder '{}' has no pending artifact", key)
                        }
                    }
                }
                // Raw artifact blocks are consumed before streaming; if one
                // slips through it stays literal text.
                TokenKind::Artifact(_) | TokenKind::Text => {
                    push_text(&mut self.segments, &tokens[first].raw)
                }
            }

            self.buffer = tokens[first + 1..].iter().map(|t| t.raw.as_str()).collect();
        }
    }
}

/// Length of the buffer prefix that is safe to display.
fn visible_len(buffer: &str) -> usize {
    let mut cut = buffer.len();
    if let Some(i) = buffer.rfind('\u{27e6}') {
        if !buffer[i..].contains('\u{27e7}') {
            cut = cut.min(i);
        }
    }
    for (open, close) in [
        (ARTIFACT_OPEN, "</artifact>"),
        ("[GRAPH:", "]"),
        ("[PRACTICE:", "]"),
    ] {
        if let Some(i) = buffer.rfind(open) {
            if !buffer[i..].contains(close) {
                cut = cut.min(i);
            }
        }
    }
    cut
}

/// Base per-character delay. Sentence punctuation pauses longest; the
/// caller adds cosmetic jitter on top.
pub fn base_delay_ms(just_typed: char) -> u32 {
    match just_typed {
        '.' | '!' | '?' => 280,
        ',' | ';' | ':' => 120,
        '\n' => 90,
        _ => 18,
    }
}

/// Apply jitter from a unit sample in `[0, 1)`.
pub fn jittered_delay_ms(base: u32, unit: f64) -> u32 {
    base + (unit.clamp(0.0, 1.0) * base as f64 * 0.6) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::markup::{placeholder_token, InlineCommand};
    use contracts::domain::artifact::{ArtifactBody, ArtifactSpec, GraphContent};

    fn stream(text: &str, pending: Vec<PendingArtifact>) -> StreamState {
        let mut state = StreamState::new(pending);
        for c in text.chars() {
            state.push_char(c);
        }
        state
    }

    fn graph_spec(title: &str) -> ArtifactSpec {
        ArtifactSpec {
            title: Some(title.to_string()),
            body: ArtifactBody::Graph(GraphContent {
                function: "x^2".to_string(),
                x_min: -2.0,
                x_max: 2.0,
                y_min: None,
                y_max: None,
                grid: true,
            }),
        }
    }

    #[test]
    fn command_commits_exactly_when_bracket_closes() {
        let text = "answer is [GRAPH:function:x:0:10]";
        let mut state = StreamState::new(Vec::new());
        // Everything up to (but excluding) the closing bracket: nothing
        // but the buffer, no committed command.
        for c in text[..text.len() - 1].chars() {
            state.push_char(c);
            assert!(
                !state
                    .segments()
                    .iter()
                    .any(|s| matches!(s, Segment::Command(_))),
                "command committed before its closing bracket"
            );
        }
        state.push_char(']');
        assert_eq!(state.segments().len(), 2);
        assert_eq!(
            state.segments()[0],
            Segment::Text("answer is ".to_string())
        );
        assert!(matches!(
            state.segments()[1],
            Segment::Command(InlineCommand::Graph { .. })
        ));
    }

    #[test]
    fn placeholder_splices_pending_artifact_mid_stream() {
        let pending = PendingArtifact {
            key: "k1".to_string(),
            artifact_id: "abc123".to_string(),
            spec: graph_spec("t"),
        };
        let text = format!("Solve this: {} and more", placeholder_token("k1"));
        let mut state = stream(&text, vec![pending]);
        state.finish();
        assert_eq!(state.segments().len(), 3);
        assert_eq!(
            state.segments()[0],
            Segment::Text("Solve this: ".to_string())
        );
        match &state.segments()[1] {
            Segment::Artifact { artifact_id, spec } => {
                assert_eq!(artifact_id, "abc123");
                assert_eq!(spec.display_title(), "t");
            }
            other => panic!("expected artifact, got {:?}", other),
        }
        assert_eq!(state.segments()[2], Segment::Text(" and more".to_string()));
    }

    #[test]
    fn plain_text_flushes_on_finish() {
        let mut state = stream("no commands here.", Vec::new());
        assert!(state.segments().is_empty());
        state.finish();
        assert_eq!(
            state.segments(),
            &[Segment::Text("no commands here.".to_string())]
        );
        assert!(state.is_done());
    }

    #[test]
    fn partial_placeholder_is_hidden_from_display() {
        let mut state = StreamState::new(Vec::new());
        for c in "abc \u{27e6}artifa".chars() {
            state.push_char(c);
        }
        assert_eq!(state.visible_buffer(), "abc ");
    }

    #[test]
    fn partial_command_is_hidden_from_display() {
        let mut state = StreamState::new(Vec::new());
        for c in "see [GRAPH:fun".chars() {
            state.push_char(c);
        }
        assert_eq!(state.visible_buffer(), "see ");
        // Ordinary brackets are not hidden.
        let mut state = StreamState::new(Vec::new());
        for c in "see [chapter".chars() {
            state.push_char(c);
        }
        assert_eq!(state.visible_buffer(), "see [chapter");
    }

    #[test]
    fn delay_policy_pauses_on_punctuation() {
        assert!(base_delay_ms('.') > base_delay_ms(','));
        assert!(base_delay_ms(',') > base_delay_ms('a'));
        assert_eq!(jittered_delay_ms(100, 0.0), 100);
        assert!(jittered_delay_ms(100, 0.999) > 100);
    }

    #[test]
    fn two_commands_in_sequence_each_commit_once() {
        let text = "[GRAPH:function:x:0:1] then [PRACTICE:easy:solve $x=1$]";
        let mut state = stream(text, Vec::new());
        state.finish();
        let commands = state
            .segments()
            .iter()
            .filter(|s| matches!(s, Segment::Command(_)))
            .count();
        assert_eq!(commands, 2);
    }
}
