//! Inline command decoding.
//!
//! Commands are compact bracket directives embedded in streamed text and
//! rendered without a backend round-trip:
//! - `[GRAPH:function:f(x)=x^2:-5:5]`
//! - `[PRACTICE:easy:Solve for x: $2x + 5 = 13$]`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InlineCommand {
    Graph {
        function: String,
        /// Parsed with standard float semantics: non-numeric input becomes
        /// NaN and must be treated as an invalid range by the renderer.
        x_min: f64,
        x_max: f64,
    },
    Practice {
        difficulty: String,
        problem: String,
    },
}

impl InlineCommand {
    /// A graph command is renderable only over a finite, non-empty range.
    pub fn has_valid_range(&self) -> bool {
        match self {
            InlineCommand::Graph { x_min, x_max, .. } => {
                x_min.is_finite() && x_max.is_finite() && x_min < x_max
            }
            InlineCommand::Practice { .. } => true,
        }
    }
}

/// Decode the bracket body (without the surrounding `[` `]`).
///
/// Returns `None` when the body is not a known command, in which case the
/// bracket text stays literal.
pub fn parse(body: &str) -> Option<InlineCommand> {
    if let Some(rest) = body.strip_prefix("GRAPH:") {
        return parse_graph(rest);
    }
    if let Some(rest) = body.strip_prefix("PRACTICE:") {
        return parse_practice(rest);
    }
    None
}

fn parse_graph(rest: &str) -> Option<InlineCommand> {
    // kind:expression:xmin:xmax — the expression may not contain colons,
    // but the bounds are always the last two fields.
    let parts: Vec<&str> = rest.split(':').collect();
    if parts.len() < 4 || parts[0] != "function" {
        return None;
    }
    let x_max = parts[parts.len() - 1];
    let x_min = parts[parts.len() - 2];
    let function = parts[1..parts.len() - 2].join(":");
    let function = strip_lhs(&function);
    if function.is_empty() {
        return None;
    }
    Some(InlineCommand::Graph {
        function,
        x_min: x_min.trim().parse::<f64>().unwrap_or(f64::NAN),
        x_max: x_max.trim().parse::<f64>().unwrap_or(f64::NAN),
    })
}

fn parse_practice(rest: &str) -> Option<InlineCommand> {
    let (difficulty, problem) = rest.split_once(':')?;
    if difficulty.is_empty() || problem.is_empty() {
        return None;
    }
    Some(InlineCommand::Practice {
        difficulty: difficulty.trim().to_string(),
        problem: problem.trim().to_string(),
    })
}

/// Drop an optional `f(x)=` / `y=` left-hand side from the expression.
fn strip_lhs(function: &str) -> String {
    let f = function.trim();
    for prefix in ["f(x)=", "y=", "f(x) =", "y ="] {
        if let Some(stripped) = f.strip_prefix(prefix) {
            return stripped.trim().to_string();
        }
    }
    f.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_graph_with_lhs_prefix() {
        let cmd = parse("GRAPH:function:f(x)=x^2:-5:5").unwrap();
        assert_eq!(
            cmd,
            InlineCommand::Graph {
                function: "x^2".to_string(),
                x_min: -5.0,
                x_max: 5.0,
            }
        );
        assert!(cmd.has_valid_range());
    }

    #[test]
    fn non_numeric_bounds_become_nan() {
        let cmd = parse("GRAPH:function:x:zero:ten").unwrap();
        match cmd {
            InlineCommand::Graph { x_min, x_max, .. } => {
                assert!(x_min.is_nan());
                assert!(x_max.is_nan());
            }
            other => panic!("expected graph, got {:?}", other),
        }
        assert!(!parse("GRAPH:function:x:zero:ten").unwrap().has_valid_range());
    }

    #[test]
    fn inverted_range_is_invalid() {
        let cmd = parse("GRAPH:function:x:5:-5").unwrap();
        assert!(!cmd.has_valid_range());
    }

    #[test]
    fn practice_problem_may_contain_colons() {
        let cmd = parse("PRACTICE:easy:Solve for x: $2x + 5 = 13$").unwrap();
        assert_eq!(
            cmd,
            InlineCommand::Practice {
                difficulty: "easy".to_string(),
                problem: "Solve for x: $2x + 5 = 13$".to_string(),
            }
        );
    }

    #[test]
    fn unknown_directive_is_not_a_command() {
        assert_eq!(parse("NOTE:remember this"), None);
        assert_eq!(parse("GRAPH:polar:r:0:1"), None);
        assert_eq!(parse("PRACTICE:easy"), None);
    }
}
