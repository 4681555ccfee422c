//! Artifact rendering: an exhaustive dispatch over the closed set of
//! artifact kinds, plus the inline-command views.

pub mod exercise;
pub mod graph;
pub mod plot;
pub mod practice;
pub mod step_by_step;

use contracts::domain::artifact::{ArtifactBody, ArtifactSpec, GraphContent};
use leptos::prelude::*;

use crate::shared::markup::InlineCommand;
use exercise::ExerciseView;
use graph::GraphView;
use practice::PracticeView;
use step_by_step::StepByStepView;

/// Container for a backend-registered artifact. The container carries the
/// persisted artifact id and a titled header; the body dispatch is a
/// compile-time-exhaustive match.
#[component]
pub fn ArtifactView(artifact_id: String, spec: ArtifactSpec) -> impl IntoView {
    let title = spec.display_title();
    let body = match spec.body {
        ArtifactBody::Graph(content) => view! { <GraphView content=content /> }.into_any(),
        ArtifactBody::Exercise(content) => view! { <ExerciseView content=content /> }.into_any(),
        ArtifactBody::StepByStep(content) => {
            view! { <StepByStepView content=content /> }.into_any()
        }
    };

    view! {
        <div class="artifact-container" data-artifact-id=artifact_id>
            <div class="artifact-header">{title}</div>
            {body}
        </div>
    }
}

/// Render an inline command. Commands have no backend identity; a graph
/// command with an invalid range degrades to inline error text.
#[component]
pub fn CommandView(command: InlineCommand) -> impl IntoView {
    if !command.has_valid_range() {
        return view! { <span class="inline-error">"[Graph Error: invalid range]"</span> }
            .into_any();
    }

    match command {
        InlineCommand::Graph {
            function,
            x_min,
            x_max,
        } => {
            let content = GraphContent {
                function: function.clone(),
                x_min,
                x_max,
                y_min: None,
                y_max: None,
                grid: true,
            };
            view! {
                <div class="inline-graph">
                    <div class="artifact-header">{format!("f(x) = {}", function)}</div>
                    <GraphView content=content />
                </div>
            }
            .into_any()
        }
        InlineCommand::Practice {
            difficulty,
            problem,
        } => view! { <PracticeView difficulty=difficulty problem=problem /> }.into_any(),
    }
}
