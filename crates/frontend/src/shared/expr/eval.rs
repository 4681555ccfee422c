//! Total evaluation over the closed function table.
//!
//! Evaluation never panics: domain errors follow IEEE semantics and show
//! up as `inf`/`NaN`, which the sampler records as gaps.

use super::parser::{Expr, Func};

pub fn eval(expr: &Expr, x: f64) -> f64 {
    match expr {
        Expr::Num(v) => *v,
        Expr::Var => x,
        Expr::Neg(inner) => -eval(inner, x),
        Expr::Add(a, b) => eval(a, x) + eval(b, x),
        Expr::Sub(a, b) => eval(a, x) - eval(b, x),
        Expr::Mul(a, b) => eval(a, x) * eval(b, x),
        Expr::Div(a, b) => eval(a, x) / eval(b, x),
        Expr::Pow(a, b) => eval(a, x).powf(eval(b, x)),
        Expr::Call(func, arg) => {
            let v = eval(arg, x);
            match func {
                Func::Sin => v.sin(),
                Func::Cos => v.cos(),
                Func::Tan => v.tan(),
                Func::Asin => v.asin(),
                Func::Acos => v.acos(),
                Func::Atan => v.atan(),
                Func::Log => v.log10(),
                Func::Ln => v.ln(),
                Func::Sqrt => v.sqrt(),
                Func::Abs => v.abs(),
                Func::Exp => v.exp(),
                Func::Floor => v.floor(),
                Func::Ceil => v.ceil(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;

    fn eval_str(src: &str, x: f64) -> f64 {
        eval(&parse(src).unwrap(), x)
    }

    #[test]
    fn arithmetic_and_variable() {
        assert_eq!(eval_str("x^3 - 2*x + 1", 2.0), 5.0);
        assert_eq!(eval_str("(x + 1) / 2", 3.0), 2.0);
    }

    #[test]
    fn function_table() {
        assert!((eval_str("sin(pi)", 0.0)).abs() < 1e-12);
        assert_eq!(eval_str("log(100)", 0.0), 2.0);
        assert_eq!(eval_str("ln(e)", 0.0), 1.0);
        assert_eq!(eval_str("sqrt(abs(x))", -9.0), 3.0);
        assert_eq!(eval_str("floor(2.7) + ceil(2.1)", 0.0), 5.0);
        assert!((eval_str("exp(0)", 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn domain_errors_are_non_finite_not_panics() {
        assert!(eval_str("1/x", 0.0).is_infinite());
        assert!(eval_str("sqrt(x)", -1.0).is_nan());
        assert!(eval_str("ln(x)", -1.0).is_nan());
        assert!(eval_str("asin(x)", 2.0).is_nan());
    }
}
