//! Committed message rendering.

use contracts::domain::chat::MessageRole;
use leptos::prelude::*;

use crate::domain::artifact::pipeline::Segment;
use crate::domain::artifact::ui::{ArtifactView, CommandView};
use crate::domain::chat::model::Message;

/// Render an ordered segment list. Text keeps its line breaks; artifacts
/// and inline commands render as interactive blocks in place.
#[component]
pub fn SegmentsView(segments: Vec<Segment>) -> impl IntoView {
    segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => {
                view! { <span class="message-text">{text}</span> }.into_any()
            }
            Segment::Artifact { artifact_id, spec } => {
                view! { <ArtifactView artifact_id=artifact_id spec=spec /> }.into_any()
            }
            Segment::Command(command) => view! { <CommandView command=command /> }.into_any(),
        })
        .collect_view()
}

#[component]
pub fn MessageView(message: Message) -> impl IntoView {
    let role_class = match message.role {
        MessageRole::User => "message message-user",
        MessageRole::Assistant => "message message-assistant",
    };

    view! {
        <div class=role_class>
            <div class="message-body">
                <SegmentsView segments=message.segments />
            </div>
        </div>
    }
}
