//! Clock access that works both in the browser and in host tests.

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Compact "time ago" label for the chat sidebar.
pub fn relative_label(then_ms: i64, now_ms: i64) -> String {
    let delta = (now_ms - then_ms).max(0) / 1000;
    match delta {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", delta / 60),
        3600..=86_399 => format!("{}h ago", delta / 3600),
        _ => format!("{}d ago", delta / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_labels() {
        let now = 1_000_000_000;
        assert_eq!(relative_label(now - 30_000, now), "just now");
        assert_eq!(relative_label(now - 120_000, now), "2m ago");
        assert_eq!(relative_label(now - 7_200_000, now), "2h ago");
        assert_eq!(relative_label(now - 172_800_000, now), "2d ago");
        // Clock skew must not underflow.
        assert_eq!(relative_label(now + 5_000, now), "just now");
    }
}
