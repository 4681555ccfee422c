//! Artifact wire types.
//!
//! An artifact is a structured, richly-rendered block (graph, exercise or
//! step-by-step solution) embedded in an assistant response as
//! `<artifact>{json}</artifact>`. The JSON shape is
//! `{"type": "...", "title": "...", "content": {...}}`.

use serde::{Deserialize, Serialize};

/// A decoded artifact specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub body: ArtifactBody,
}

/// Closed set of artifact kinds. An unrecognized `type` fails
/// deserialization; there is no unknown-type variant on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum ArtifactBody {
    Graph(GraphContent),
    Exercise(ExerciseContent),
    StepByStep(StepByStepContent),
}

impl ArtifactSpec {
    /// Title shown in the artifact header, with a per-kind default.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(t) if !t.is_empty() => t.clone(),
            _ => match &self.body {
                ArtifactBody::Graph(g) => format!("f(x) = {}", g.function),
                ArtifactBody::Exercise(_) => "Guided exercise".to_string(),
                ArtifactBody::StepByStep(_) => "Step-by-step solution".to_string(),
            },
        }
    }
}

/// Payload for a function graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphContent {
    pub function: String,
    #[serde(default = "default_x_min")]
    pub x_min: f64,
    #[serde(default = "default_x_max")]
    pub x_max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
    #[serde(default = "default_grid")]
    pub grid: bool,
}

fn default_x_min() -> f64 {
    -10.0
}

fn default_x_max() -> f64 {
    10.0
}

fn default_grid() -> bool {
    true
}

/// Payload for a guided exercise: ordered steps checked one by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseContent {
    pub steps: Vec<ExerciseStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseStep {
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub expected_answer: String,
    /// Tolerance for numeric comparison; the client default applies when
    /// omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

/// Payload for a step-by-step solution reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepByStepContent {
    pub steps: Vec<SolutionStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub action: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtifactRequest {
    pub artifact: ArtifactSpec,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtifactResponse {
    pub artifact_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_graph_artifact() {
        let json = r#"{"type":"graph","title":"t","content":{"function":"x^2","x_min":-2,"x_max":2}}"#;
        let spec: ArtifactSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.title.as_deref(), Some("t"));
        match &spec.body {
            ArtifactBody::Graph(g) => {
                assert_eq!(g.function, "x^2");
                assert_eq!(g.x_min, -2.0);
                assert_eq!(g.x_max, 2.0);
                assert!(g.grid);
            }
            other => panic!("expected graph, got {:?}", other),
        }
    }

    #[test]
    fn graph_bounds_default_when_omitted() {
        let json = r#"{"type":"graph","content":{"function":"sin(x)"}}"#;
        let spec: ArtifactSpec = serde_json::from_str(json).unwrap();
        match spec.body {
            ArtifactBody::Graph(g) => {
                assert_eq!(g.x_min, -10.0);
                assert_eq!(g.x_max, 10.0);
            }
            other => panic!("expected graph, got {:?}", other),
        }
    }

    #[test]
    fn unknown_type_is_an_error() {
        let json = r#"{"type":"video","title":"t","content":{}}"#;
        assert!(serde_json::from_str::<ArtifactSpec>(json).is_err());
    }

    #[test]
    fn round_trips_exercise_content() {
        let json = r#"{"type":"exercise","title":"Practice","content":{"steps":[{"instruction":"Solve 2x=4","hint":"divide","expected_answer":"2"}]}}"#;
        let spec: ArtifactSpec = serde_json::from_str(json).unwrap();
        let encoded = serde_json::to_string(&spec).unwrap();
        let again: ArtifactSpec = serde_json::from_str(&encoded).unwrap();
        assert_eq!(spec, again);
    }

    #[test]
    fn default_titles_per_kind() {
        let spec: ArtifactSpec =
            serde_json::from_str(r#"{"type":"graph","content":{"function":"x"}}"#).unwrap();
        assert_eq!(spec.display_title(), "f(x) = x");
    }
}
