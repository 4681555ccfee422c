//! Guided exercise: ordered steps with hints, answer checking and a
//! progress indicator.

use contracts::domain::artifact::{ExerciseContent, ExerciseStep};
use leptos::prelude::*;

use crate::domain::artifact::answer::{check_answer, DEFAULT_TOLERANCE};
use crate::shared::icons::icon;

#[component]
pub fn ExerciseView(content: ExerciseContent) -> impl IntoView {
    let total = content.steps.len();
    let completed = RwSignal::new(vec![false; total]);
    let done_count = Memo::new(move |_| completed.get().iter().filter(|c| **c).count());

    view! {
        <div class="exercise-view">
            <div class="exercise-progress">
                <span>{move || format!("{} / {} steps", done_count.get(), total)}</span>
                <div class="exercise-progress-bar">
                    <div
                        class="exercise-progress-fill"
                        style:width=move || {
                            if total == 0 {
                                "0%".to_string()
                            } else {
                                format!("{}%", done_count.get() * 100 / total)
                            }
                        }
                    ></div>
                </div>
            </div>

            <ol class="exercise-steps">
                {content
                    .steps
                    .into_iter()
                    .enumerate()
                    .map(|(idx, step)| view! { <StepRow idx=idx step=step completed=completed /> })
                    .collect_view()}
            </ol>

            <Show when=move || { total > 0 && done_count.get() == total }>
                <div class="exercise-complete">
                    {icon("check")}
                    " All steps complete. Hmph, not bad at all."
                </div>
            </Show>
        </div>
    }
}

/// Fold a check outcome into the completion list. Completion latches: a
/// solved step stays solved even if a later re-check comes out wrong, so
/// the progress count and the completion banner never regress.
fn record_result(completed: &mut [bool], idx: usize, correct: bool) {
    if let Some(slot) = completed.get_mut(idx) {
        *slot = *slot || correct;
    }
}

#[component]
fn StepRow(idx: usize, step: ExerciseStep, completed: RwSignal<Vec<bool>>) -> impl IntoView {
    let answer = RwSignal::new(String::new());
    let hint_shown = RwSignal::new(false);
    // None until first check, then correct / incorrect.
    let verdict = RwSignal::new(None::<bool>);

    let expected = step.expected_answer.clone();
    let tolerance = step.tolerance.unwrap_or(DEFAULT_TOLERANCE);

    let check = move |_| {
        let correct = check_answer(&answer.get(), &expected, tolerance);
        verdict.set(Some(correct));
        completed.update(|list| record_result(list, idx, correct));
    };

    let hint = step.hint.clone();

    view! {
        <li class=move || match verdict.get() {
            Some(true) => "exercise-step correct",
            Some(false) => "exercise-step incorrect",
            None => "exercise-step",
        }>
            <div class="step-instruction">{step.instruction.clone()}</div>

            {hint.map(|hint_text| view! {
                <div class="step-hint">
                    <button
                        class="step-hint-toggle"
                        on:click=move |_| hint_shown.update(|s| *s = !*s)
                    >
                        {icon("hint")}
                        {move || if hint_shown.get() { " Hide hint" } else { " Hint" }}
                    </button>
                    <Show when=move || hint_shown.get()>
                        <span class="step-hint-text">{hint_text.clone()}</span>
                    </Show>
                </div>
            })}

            <div class="step-answer">
                <input
                    class="step-answer-input"
                    placeholder="your answer"
                    prop:value=move || answer.get()
                    on:input=move |ev| answer.set(event_target_value(&ev))
                />
                <button class="step-check-btn" on:click=check>"Check"</button>
                {move || verdict.get().map(|correct| {
                    if correct {
                        view! { <span class="step-verdict ok">"correct"</span> }
                    } else {
                        view! { <span class="step-verdict bad">"try again"</span> }
                    }
                })}
            </div>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_latches_across_a_wrong_recheck() {
        let mut completed = vec![false, false];
        record_result(&mut completed, 0, true);
        assert_eq!(completed, vec![true, false]);
        // Editing the answer and checking wrong must not undo the step.
        record_result(&mut completed, 0, false);
        assert_eq!(completed, vec![true, false]);
    }

    #[test]
    fn wrong_answers_leave_the_step_open() {
        let mut completed = vec![false];
        record_result(&mut completed, 0, false);
        assert_eq!(completed, vec![false]);
        record_result(&mut completed, 0, true);
        assert_eq!(completed, vec![true]);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut completed = vec![false];
        record_result(&mut completed, 5, true);
        assert_eq!(completed, vec![false]);
    }
}
