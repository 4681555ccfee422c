//! Exercise answer validation.

/// Tolerance used when an exercise step does not specify one.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Numeric comparison within tolerance when both sides parse as numbers,
/// otherwise case-insensitive comparison of trimmed text.
pub fn check_answer(user: &str, expected: &str, tolerance: f64) -> bool {
    let user = user.trim();
    let expected = expected.trim();
    match (user.parse::<f64>(), expected.parse::<f64>()) {
        (Ok(a), Ok(b)) => (a - b).abs() <= tolerance,
        _ => user.to_lowercase() == expected.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_within_tolerance() {
        assert!(check_answer("2.005", "2", DEFAULT_TOLERANCE));
        assert!(check_answer("2.01", "2", DEFAULT_TOLERANCE));
        assert!(!check_answer("2.011", "2", DEFAULT_TOLERANCE));
        assert!(check_answer(" -3 ", "-3.0", DEFAULT_TOLERANCE));
    }

    #[test]
    fn string_comparison_is_case_insensitive() {
        assert!(check_answer("X + 1", "x + 1", DEFAULT_TOLERANCE));
        assert!(check_answer("  Converges ", "converges", DEFAULT_TOLERANCE));
        assert!(!check_answer("diverges", "converges", DEFAULT_TOLERANCE));
    }

    #[test]
    fn mixed_numeric_and_text_falls_back_to_text() {
        // "two" does not parse, so this is a string comparison.
        assert!(!check_answer("two", "2", DEFAULT_TOLERANCE));
    }
}
