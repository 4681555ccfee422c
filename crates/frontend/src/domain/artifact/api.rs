//! Artifact backend calls.

use contracts::domain::artifact::{ArtifactSpec, CreateArtifactRequest, CreateArtifactResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Register an artifact with the backend, returning its persisted id.
/// No retry policy: a failed call turns the occurrence into inline error
/// text upstream.
pub async fn create_artifact(spec: ArtifactSpec, session_id: String) -> Result<String, String> {
    let request = CreateArtifactRequest {
        artifact: spec,
        session_id,
    };

    let response = Request::post(&api_url("/artifacts/create"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Artifact creation failed: {}", response.status()));
    }

    response
        .json::<CreateArtifactResponse>()
        .await
        .map(|r| r.artifact_id)
        .map_err(|e| format!("Failed to parse response: {}", e))
}
