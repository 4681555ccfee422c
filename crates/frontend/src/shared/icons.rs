//! Tiny inline icon table (text glyphs, terminal aesthetic).

use leptos::prelude::*;

pub fn icon(name: &str) -> impl IntoView {
    let glyph = match name {
        "send" => "➤",
        "plus" => "+",
        "close" => "✕",
        "trash" => "🗑",
        "gear" => "⚙",
        "user" => "◉",
        "sun" => "☀",
        "moon" => "☾",
        "expand" => "⤢",
        "collapse" => "⤡",
        "replay" => "↺",
        "hint" => "?",
        "check" => "✓",
        "sidebar" => "☰",
        _ => "·",
    };
    view! { <span class="icon" aria-hidden="true">{glyph}</span> }
}
