//! Health and admin backend calls.

use contracts::system::admin::{AdminStats, HealthResponse, SyncResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

pub async fn health() -> Result<HealthResponse, String> {
    let response = Request::get(&api_url("/health"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Health check failed: {}", response.status()));
    }

    response
        .json::<HealthResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn stats(access_token: &str) -> Result<AdminStats, String> {
    let response = Request::get(&api_url("/admin/stats"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Stats request failed: {}", response.status()));
    }

    response
        .json::<AdminStats>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Ask the backend to flush its session store to persistent storage.
pub async fn sync(access_token: &str) -> Result<SyncResponse, String> {
    let response = Request::post(&api_url("/admin/sync"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Sync request failed: {}", response.status()));
    }

    response
        .json::<SyncResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
