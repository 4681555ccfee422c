//! Step-by-step solution reveal.
//!
//! Steps animate into view on a fixed timer, a click advances early, and
//! replay resets the reveal. A generation counter supersedes any timer
//! loop that is still sleeping when replay fires.

use contracts::domain::artifact::StepByStepContent;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

const REVEAL_INTERVAL_MS: u32 = 1_200;

#[component]
pub fn StepByStepView(content: StepByStepContent) -> impl IntoView {
    let total = content.steps.len();
    let revealed = RwSignal::new(if total == 0 { 0 } else { 1 });
    let generation = RwSignal::new(0u32);

    let start = move || {
        let run = generation.get_untracked();
        spawn_local(async move {
            loop {
                TimeoutFuture::new(REVEAL_INTERVAL_MS).await;
                if generation.get_untracked() != run {
                    return; // superseded by replay
                }
                let mut finished = false;
                revealed.update(|r| {
                    if *r < total {
                        *r += 1;
                    }
                    finished = *r >= total;
                });
                if finished {
                    return;
                }
            }
        });
    };

    Effect::new(move |started: Option<bool>| {
        if started.is_none() {
            start();
        }
        true
    });

    let advance = move |_| {
        revealed.update(|r| {
            if *r < total {
                *r += 1;
            }
        });
    };

    let replay = move || {
        generation.update(|g| *g += 1);
        revealed.set(if total == 0 { 0 } else { 1 });
        start();
    };

    view! {
        <div class="steps-view" on:click=advance>
            <ol class="solution-steps">
                {content
                    .steps
                    .into_iter()
                    .enumerate()
                    .map(|(idx, step)| {
                        let visible = move || idx < revealed.get();
                        view! {
                            <li class=move || {
                                if visible() { "solution-step visible" } else { "solution-step" }
                            }>
                                <div class="solution-action">{step.action}</div>
                                <div class="solution-explanation">{step.explanation}</div>
                                {step.result.map(|r| view! {
                                    <div class="solution-result">{r}</div>
                                })}
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
            <div class="steps-footer">
                <span class="steps-counter">
                    {move || format!("{} / {}", revealed.get(), total)}
                </span>
                <button
                    class="steps-replay-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        replay();
                    }
                >
                    {icon("replay")}
                    " Replay"
                </button>
            </div>
        </div>
    }
}
