//! Restricted math expression engine for graph rendering.
//!
//! Pipeline: [`lexer`] → [`parser`] (recursive descent) → [`eval`] over a
//! closed function/constant table. The grammar covers arithmetic with `^`
//! as exponent, one free variable `x`, the functions
//! `sin cos tan asin acos atan log ln sqrt abs exp floor ceil` (log is
//! base 10) and the constants `pi` and `e`. Nothing else parses, so
//! user-supplied expressions can never reach a general-purpose evaluator.

pub mod eval;
pub mod lexer;
pub mod parser;

pub use eval::eval;
pub use parser::{parse, Expr};

/// Number of sampling intervals used by the graph renderer.
pub const SAMPLE_POINTS: usize = 1000;

/// Evaluate `function` at `n + 1` evenly spaced points across
/// `[x_min, x_max]`. Samples that come out non-finite are recorded as
/// gaps (`None`) so one bad point never aborts the curve.
pub fn sample(
    function: &str,
    x_min: f64,
    x_max: f64,
    n: usize,
) -> Result<Vec<(f64, Option<f64>)>, String> {
    if !(x_min.is_finite() && x_max.is_finite() && x_min < x_max) {
        return Err("invalid x range".to_string());
    }
    if n == 0 {
        return Err("need at least one sampling interval".to_string());
    }
    let expr = parse(function)?;
    let mut points = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let x = x_min + (x_max - x_min) * (i as f64) / (n as f64);
        let y = eval(&expr, x);
        points.push((x, y.is_finite().then_some(y)));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_and_spacing() {
        let points = sample("x^2", -2.0, 2.0, 4).unwrap();
        assert_eq!(points.len(), 5);
        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(points[0].1, Some(4.0));
        assert_eq!(points[2].1, Some(0.0));
    }

    #[test]
    fn undefined_samples_become_gaps() {
        // sqrt is undefined left of zero; the curve keeps going.
        let points = sample("sqrt(x)", -1.0, 1.0, 2).unwrap();
        assert_eq!(points[0].1, None);
        assert_eq!(points[1].1, Some(0.0));
        assert_eq!(points[2].1, Some(1.0));
    }

    #[test]
    fn pole_becomes_a_gap() {
        let points = sample("1/x", -1.0, 1.0, 2).unwrap();
        assert_eq!(points[1].0, 0.0);
        assert_eq!(points[1].1, None);
    }

    #[test]
    fn invalid_range_is_an_error() {
        assert!(sample("x", 1.0, 1.0, 10).is_err());
        assert!(sample("x", f64::NAN, 1.0, 10).is_err());
        assert!(sample("x", 2.0, -2.0, 10).is_err());
    }

    #[test]
    fn parse_errors_propagate() {
        assert!(sample("x +* 2", 0.0, 1.0, 10).is_err());
        assert!(sample("foo(x)", 0.0, 1.0, 10).is_err());
    }
}
