//! Chat and session backend calls.

use contracts::domain::chat::{
    ChatRequest, ChatResponse, ConversationHistory, NewSessionResponse, SessionStatus,
};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Send a message, returning the full response text plus the
/// (possibly newly assigned) session id.
pub async fn send_message(
    message: String,
    session_id: Option<String>,
) -> Result<ChatResponse, String> {
    let request = ChatRequest {
        message,
        session_id,
    };

    let response = Request::post(&api_url("/chat"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Chat request failed: {}", response.status()));
    }

    response
        .json::<ChatResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn new_session() -> Result<String, String> {
    let response = Request::post(&api_url("/sessions/new"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Session creation failed: {}", response.status()));
    }

    response
        .json::<NewSessionResponse>()
        .await
        .map(|r| r.session_id)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn session_status(session_id: &str) -> Result<SessionStatus, String> {
    let response = Request::get(&api_url(&format!("/sessions/{}/status", session_id)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Status check failed: {}", response.status()));
    }

    response
        .json::<SessionStatus>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Make sure the backend still knows this session (it may have been
/// evicted); returns the id to keep using.
pub async fn ensure_session(session_id: &str) -> Result<String, String> {
    let response = Request::post(&api_url(&format!("/sessions/{}/ensure", session_id)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Session ensure failed: {}", response.status()));
    }

    response
        .json::<NewSessionResponse>()
        .await
        .map(|r| r.session_id)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Clear conversation history but keep the session alive.
pub async fn clear_session(session_id: &str) -> Result<(), String> {
    let response = Request::post(&api_url(&format!("/sessions/{}/clear", session_id)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Session clear failed: {}", response.status()));
    }
    Ok(())
}

pub async fn delete_session(session_id: &str) -> Result<(), String> {
    let response = Request::delete(&api_url(&format!("/sessions/{}", session_id)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Session delete failed: {}", response.status()));
    }
    Ok(())
}

pub async fn history(session_id: &str) -> Result<ConversationHistory, String> {
    let response = Request::get(&api_url(&format!("/history/{}", session_id)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("History fetch failed: {}", response.status()));
    }

    response
        .json::<ConversationHistory>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
