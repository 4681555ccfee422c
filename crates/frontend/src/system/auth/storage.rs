//! Token persistence. Tokens ride the same freshness-stamped records as
//! everything else, so a 30-day-old token is dropped on load instead of
//! being sent to the backend.

use crate::shared::storage::{self, AUTH_TTL_MS};

const ACCESS_TOKEN_KEY: &str = "tutor-auth-access";
const REFRESH_TOKEN_KEY: &str = "tutor-auth-refresh";

pub fn save_access_token(token: &str) {
    storage::save(ACCESS_TOKEN_KEY, &token.to_string());
}

pub fn get_access_token() -> Option<String> {
    storage::load(ACCESS_TOKEN_KEY, AUTH_TTL_MS)
}

pub fn save_refresh_token(token: &str) {
    storage::save(REFRESH_TOKEN_KEY, &token.to_string());
}

pub fn get_refresh_token() -> Option<String> {
    storage::load(REFRESH_TOKEN_KEY, AUTH_TTL_MS)
}

pub fn clear_tokens() {
    storage::remove(ACCESS_TOKEN_KEY);
    storage::remove(REFRESH_TOKEN_KEY);
}
