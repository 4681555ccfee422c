//! Interactive function graph.
//!
//! Controls (function text, x/y bounds) re-evaluate the curve live through
//! signals; the SVG element itself is never recreated. The fullscreen
//! toggle swaps a container class and lets CSS rescale the drawing.

use contracts::domain::artifact::GraphContent;
use leptos::prelude::*;

use super::plot::{self, Viewport, PLOT_HEIGHT, PLOT_WIDTH};
use crate::shared::expr::{self, SAMPLE_POINTS};
use crate::shared::icons::icon;

fn parse_bound(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok()
}

#[component]
pub fn GraphView(content: GraphContent) -> impl IntoView {
    let function = RwSignal::new(content.function.clone());
    let x_min = RwSignal::new(content.x_min.to_string());
    let x_max = RwSignal::new(content.x_max.to_string());
    let y_min = RwSignal::new(content.y_min.map(|v| v.to_string()).unwrap_or_default());
    let y_max = RwSignal::new(content.y_max.map(|v| v.to_string()).unwrap_or_default());
    let fullscreen = RwSignal::new(false);
    let show_grid = content.grid;

    let samples = Memo::new(move |_| {
        let lo = parse_bound(&x_min.get()).unwrap_or(f64::NAN);
        let hi = parse_bound(&x_max.get()).unwrap_or(f64::NAN);
        expr::sample(&function.get(), lo, hi, SAMPLE_POINTS)
    });

    let frame = Memo::new(move |_| {
        let points = samples.get().ok()?;
        let lo = parse_bound(&x_min.get())?;
        let hi = parse_bound(&x_max.get())?;
        let (range_lo, range_hi) =
            plot::y_range(&points, parse_bound(&y_min.get()), parse_bound(&y_max.get()))?;
        let view = Viewport {
            x_min: lo,
            x_max: hi,
            y_min: range_lo,
            y_max: range_hi,
        };
        Some((plot::svg_path(&points, &view), view))
    });

    view! {
        <div class=move || {
            if fullscreen.get() { "graph-view fullscreen" } else { "graph-view" }
        }>
            <div class="graph-controls">
                <label>
                    "f(x) ="
                    <input
                        class="graph-input graph-fn"
                        prop:value=move || function.get()
                        on:change=move |ev| function.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "x:"
                    <input
                        class="graph-input graph-bound"
                        prop:value=move || x_min.get()
                        on:change=move |ev| x_min.set(event_target_value(&ev))
                    />
                    "to"
                    <input
                        class="graph-input graph-bound"
                        prop:value=move || x_max.get()
                        on:change=move |ev| x_max.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "y:"
                    <input
                        class="graph-input graph-bound"
                        placeholder="auto"
                        prop:value=move || y_min.get()
                        on:change=move |ev| y_min.set(event_target_value(&ev))
                    />
                    "to"
                    <input
                        class="graph-input graph-bound"
                        placeholder="auto"
                        prop:value=move || y_max.get()
                        on:change=move |ev| y_max.set(event_target_value(&ev))
                    />
                </label>
                <button
                    class="graph-fullscreen-btn"
                    title="Toggle fullscreen"
                    on:click=move |_| fullscreen.update(|f| *f = !*f)
                >
                    {move || if fullscreen.get() { icon("collapse") } else { icon("expand") }}
                </button>
            </div>

            {move || match (samples.get(), frame.get()) {
                (Err(err), _) => view! {
                    <div class="graph-error">{format!("Cannot plot: {}", err)}</div>
                }
                .into_any(),
                (Ok(_), None) => view! {
                    <div class="graph-error">"Cannot plot: no finite values in range"</div>
                }
                .into_any(),
                (Ok(_), Some((path, view_box))) => {
                    let grid = show_grid.then(|| {
                        let vertical = plot::grid_positions(10, PLOT_WIDTH);
                        let horizontal = plot::grid_positions(8, PLOT_HEIGHT);
                        view! {
                            <g class="graph-grid">
                                {vertical
                                    .into_iter()
                                    .map(|x| view! {
                                        <line x1=x y1="0" x2=x y2=PLOT_HEIGHT />
                                    })
                                    .collect_view()}
                                {horizontal
                                    .into_iter()
                                    .map(|y| view! {
                                        <line x1="0" y1=y x2=PLOT_WIDTH y2=y />
                                    })
                                    .collect_view()}
                            </g>
                        }
                    });
                    // Axes only when zero is inside the viewport.
                    let x_axis = (view_box.y_min < 0.0 && view_box.y_max > 0.0)
                        .then(|| view_box.y_to_px(0.0));
                    let y_axis = (view_box.x_min < 0.0 && view_box.x_max > 0.0)
                        .then(|| view_box.x_to_px(0.0));
                    view! {
                        <svg
                            class="graph-canvas"
                            viewBox=format!("0 0 {} {}", PLOT_WIDTH, PLOT_HEIGHT)
                            preserveAspectRatio="xMidYMid meet"
                        >
                            {grid}
                            {x_axis.map(|y| view! {
                                <line class="graph-axis" x1="0" y1=y x2=PLOT_WIDTH y2=y />
                            })}
                            {y_axis.map(|x| view! {
                                <line class="graph-axis" x1=x y1="0" x2=x y2=PLOT_HEIGHT />
                            })}
                            <path class="graph-curve" d=path fill="none" />
                        </svg>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
