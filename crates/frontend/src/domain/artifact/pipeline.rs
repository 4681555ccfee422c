//! Artifact registration and placeholder substitution.
//!
//! Each `<artifact>` occurrence in a response moves through the states
//! `matched → registered → placeholder-inserted → spliced`, or straight to
//! a terminal error (inline `[Artifact Error: …]` text) when registration
//! with the backend fails. Surrounding text is never blocked: the matched
//! block is replaced by a unique placeholder token immediately, the typed
//! text carries the token through the stream, and the rendered artifact is
//! spliced in where the token lands.
//!
//! The steps are deliberately pure ([`plan`], [`apply_registration`],
//! [`splice`]); only [`process_response`] awaits the backend.

use std::future::Future;

use contracts::domain::artifact::ArtifactSpec;
use serde::{Deserialize, Serialize};

use crate::shared::markup::{self, InlineCommand, TokenKind};

/// One piece of a committed message, rendered in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Text(String),
    Artifact {
        artifact_id: String,
        spec: ArtifactSpec,
    },
    Command(InlineCommand),
}

/// An artifact registered with the backend and waiting for its
/// placeholder to surface in committed text. Consumed exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingArtifact {
    /// Key inside the placeholder token.
    pub key: String,
    pub artifact_id: String,
    pub spec: ArtifactSpec,
}

impl PendingArtifact {
    pub fn token(&self) -> String {
        markup::placeholder_token(&self.key)
    }
}

/// Response text split into literal text and artifact occurrences.
/// Inline commands stay literal here; they are handled mid-stream.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanPart {
    Text(String),
    Occurrence(ArtifactSpec),
}

pub fn plan(text: &str) -> Vec<PlanPart> {
    let mut parts: Vec<PlanPart> = Vec::new();
    for token in markup::tokenize(text) {
        match token.kind {
            TokenKind::Artifact(spec) => parts.push(PlanPart::Occurrence(spec)),
            _ => match parts.last_mut() {
                Some(PlanPart::Text(prev)) => prev.push_str(&token.raw),
                _ => parts.push(PlanPart::Text(token.raw)),
            },
        }
    }
    parts
}

/// Inline text shown when registration fails; the occurrence is terminal
/// and never queued.
pub fn error_text(spec: &ArtifactSpec) -> String {
    format!("[Artifact Error: {}]", spec.display_title())
}

/// Fold registration outcomes back into the plan, producing the
/// placeholder-bearing text plus the pending queue. Outcomes are matched
/// to occurrences in text order.
pub fn apply_registration(
    parts: Vec<PlanPart>,
    mut outcomes: Vec<Result<String, String>>,
) -> (String, Vec<PendingArtifact>) {
    let mut text = String::new();
    let mut pending = Vec::new();
    let mut outcome_iter = outcomes.drain(..);

    for part in parts {
        match part {
            PlanPart::Text(t) => text.push_str(&t),
            PlanPart::Occurrence(spec) => match outcome_iter.next() {
                Some(Ok(artifact_id)) => {
                    let item = PendingArtifact {
                        key: uuid::Uuid::new_v4().to_string(),
                        artifact_id,
                        spec,
                    };
                    text.push_str(&item.token());
                    pending.push(item);
                }
                Some(Err(err)) => {
                    log::error!("artifact registration failed: {}", err);
                    text.push_str(&error_text(&spec));
                }
                None => {
                    log::error!("missing registration outcome for artifact occurrence");
                    text.push_str(&error_text(&spec));
                }
            },
        }
    }

    (text, pending)
}

/// Register every artifact occurrence in `text` with the backend via
/// `register`, returning the placeholder-bearing text and pending queue.
/// One failed occurrence degrades to inline error text; the rest proceed.
pub async fn process_response<F, Fut>(text: &str, mut register: F) -> (String, Vec<PendingArtifact>)
where
    F: FnMut(ArtifactSpec) -> Fut,
    Fut: Future<Output = Result<String, String>>,
{
    let parts = plan(text);
    let mut outcomes = Vec::new();
    for part in &parts {
        if let PlanPart::Occurrence(spec) = part {
            outcomes.push(register(spec.clone()).await);
        }
    }
    apply_registration(parts, outcomes)
}

/// Resolve committed text against the pending queue, consuming each item
/// at most once. Placeholders with no pending item, and pending items
/// whose placeholder never surfaced, are dropped with a warning —
/// hand-off is best effort.
pub fn splice(text: &str, mut pending: Vec<PendingArtifact>) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    for token in markup::tokenize(text) {
        match token.kind {
            TokenKind::Placeholder(key) => {
                match pending.iter().position(|p| p.key == key) {
                    Some(idx) => {
                        let item = pending.remove(idx);
                        segments.push(Segment::Artifact {
                            artifact_id: item.artifact_id,
                            spec: item.spec,
                        });
                    }
                    None => log::warn!("placeholder '{}' has no pending artifact", key),
                }
            }
            TokenKind::Command(cmd) => segments.push(Segment::Command(cmd)),
            _ => push_text(&mut segments, &token.raw),
        }
    }
    for item in &pending {
        log::warn!(
            "artifact {} was registered but its placeholder never surfaced",
            item.artifact_id
        );
    }
    segments
}

/// Append text to the segment list, merging with a trailing text segment.
pub fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(Segment::Text(prev)) => prev.push_str(text),
        _ => segments.push(Segment::Text(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::artifact::ArtifactBody;

    const GRAPH_T: &str = r#"<artifact>{"type":"graph","title":"t","content":{"function":"x^2","x_min":-2,"x_max":2}}</artifact>"#;

    fn run(text: &str, outcomes: Vec<Result<String, String>>) -> (String, Vec<PendingArtifact>) {
        apply_registration(plan(text), outcomes)
    }

    #[test]
    fn successful_registration_inserts_placeholder_and_queues_once() {
        let input = format!("Solve this: {}", GRAPH_T);
        let (text, pending) = run(&input, vec![Ok("abc123".to_string())]);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].artifact_id, "abc123");
        assert_eq!(text, format!("Solve this: {}", pending[0].token()));

        let segments = splice(&text, pending.clone());
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::Text("Solve this: ".to_string()));
        match &segments[1] {
            Segment::Artifact { artifact_id, spec } => {
                assert_eq!(artifact_id, "abc123");
                assert_eq!(spec.display_title(), "t");
                assert!(matches!(spec.body, ArtifactBody::Graph(_)));
            }
            other => panic!("expected artifact segment, got {:?}", other),
        }
    }

    #[test]
    fn failed_registration_becomes_inline_error_and_no_queue() {
        let input = format!("Solve this: {}", GRAPH_T);
        let (text, pending) = run(&input, vec![Err("http 500".to_string())]);
        assert!(pending.is_empty());
        assert_eq!(text, "Solve this: [Artifact Error: t]");
        let segments = splice(&text, pending);
        assert_eq!(
            segments,
            vec![Segment::Text("Solve this: [Artifact Error: t]".to_string())]
        );
    }

    #[test]
    fn two_artifacts_get_distinct_placeholders_and_ids() {
        let input = format!("a {} b {} c", GRAPH_T, GRAPH_T);
        let (text, pending) = run(
            &input,
            vec![Ok("id-1".to_string()), Ok("id-2".to_string())],
        );
        assert_eq!(pending.len(), 2);
        assert_ne!(pending[0].key, pending[1].key);

        let segments = splice(&text, pending);
        let ids: Vec<&str> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Artifact { artifact_id, .. } => Some(artifact_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec!["id-1", "id-2"]);
        // No leftover placeholder text anywhere.
        for segment in &segments {
            if let Segment::Text(t) = segment {
                assert!(!t.contains('\u{27e6}'), "leftover placeholder in {:?}", t);
            }
        }
    }

    #[test]
    fn one_failure_does_not_abort_the_other_occurrence() {
        let input = format!("{} mid {}", GRAPH_T, GRAPH_T);
        let (text, pending) = run(
            &input,
            vec![Err("boom".to_string()), Ok("ok-2".to_string())],
        );
        assert_eq!(pending.len(), 1);
        assert!(text.starts_with("[Artifact Error: t] mid "));
        assert!(text.contains(&pending[0].token()));
    }

    #[test]
    fn orphan_placeholder_is_dropped_silently() {
        let text = format!("x {} y", markup::placeholder_token("ghost"));
        let segments = splice(&text, Vec::new());
        assert_eq!(segments, vec![Segment::Text("x  y".to_string())]);
    }

    #[test]
    fn inline_commands_survive_planning_as_text() {
        let parts = plan("see [GRAPH:function:x:0:10] now");
        assert_eq!(
            parts,
            vec![PlanPart::Text("see [GRAPH:function:x:0:10] now".to_string())]
        );
    }

    /// Drive a future that never actually suspends to completion.
    fn block_on<F: Future>(fut: F) -> F::Output {
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn raw_waker() -> RawWaker {
            fn clone(_: *const ()) -> RawWaker {
                raw_waker()
            }
            fn noop(_: *const ()) {}
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut fut = Box::pin(fut);
        loop {
            if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
                return out;
            }
        }
    }

    fn graph_block(title: &str) -> String {
        format!(
            r#"<artifact>{{"type":"graph","title":"{}","content":{{"function":"x^2","x_min":-2,"x_max":2}}}}</artifact>"#,
            title
        )
    }

    #[test]
    fn process_response_registers_occurrences_in_text_order() {
        let input = format!("x {} y {} z", graph_block("a"), graph_block("b"));
        let seen = std::cell::RefCell::new(Vec::new());

        let (text, pending) = block_on(process_response(&input, |spec| {
            seen.borrow_mut().push(spec.display_title());
            let id = format!("id-{}", seen.borrow().len());
            async move { Ok(id) }
        }));

        // Occurrences reach the backend in the order they appear in text,
        // and each outcome folds back onto its own occurrence.
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].artifact_id, "id-1");
        assert_eq!(pending[1].artifact_id, "id-2");
        assert_eq!(pending[0].spec.display_title(), "a");
        assert_eq!(pending[1].spec.display_title(), "b");
        assert_eq!(
            text,
            format!("x {} y {} z", pending[0].token(), pending[1].token())
        );
    }

    #[test]
    fn process_response_mixes_failures_with_successes() {
        let input = format!("{} mid {}", graph_block("a"), graph_block("b"));
        let calls = std::cell::Cell::new(0u32);

        let (text, pending) = block_on(process_response(&input, |_| {
            calls.set(calls.get() + 1);
            let outcome = if calls.get() == 1 {
                Err("http 500".to_string())
            } else {
                Ok("ok-2".to_string())
            };
            async move { outcome }
        }));

        assert_eq!(calls.get(), 2);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].artifact_id, "ok-2");
        assert_eq!(
            text,
            format!("[Artifact Error: a] mid {}", pending[0].token())
        );
    }
}
