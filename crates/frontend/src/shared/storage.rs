//! Freshness-stamped JSON records in `localStorage`.
//!
//! Every persisted value is wrapped in a [`StoredRecord`] carrying the
//! save timestamp; loads enforce a max age and silently discard stale or
//! undecodable entries. Storage failures are logged and treated as
//! no-ops — they are never surfaced to the user.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::time::now_ms;

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
/// Auth tokens and conversation snapshots both expire after 30 days.
pub const AUTH_TTL_MS: i64 = 30 * DAY_MS;
pub const CONVERSATION_TTL_MS: i64 = 30 * DAY_MS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord<T> {
    pub data: T,
    pub saved_at: i64,
}

impl<T> StoredRecord<T> {
    pub fn is_fresh(&self, now_ms: i64, max_age_ms: i64) -> bool {
        now_ms.saturating_sub(self.saved_at) <= max_age_ms
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Persist `value` under `key` with the current timestamp.
pub fn save<T: Serialize>(key: &str, value: &T) {
    let record = StoredRecord {
        data: value,
        saved_at: now_ms(),
    };
    let json = match serde_json::to_string(&record) {
        Ok(json) => json,
        Err(err) => {
            log::error!("failed to serialize '{}': {}", key, err);
            return;
        }
    };
    if let Some(storage) = local_storage() {
        if storage.set_item(key, &json).is_err() {
            log::error!("failed to write '{}' to localStorage", key);
        }
    }
}

/// Load `key`, discarding entries older than `max_age_ms` or that no
/// longer decode (stale entries are also removed from storage).
pub fn load<T: DeserializeOwned>(key: &str, max_age_ms: i64) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok()??;
    match serde_json::from_str::<StoredRecord<T>>(&json) {
        Ok(record) if record.is_fresh(now_ms(), max_age_ms) => Some(record.data),
        Ok(_) => {
            log::info!("dropping expired record '{}'", key);
            let _ = storage.remove_item(key);
            None
        }
        Err(err) => {
            log::warn!("dropping undecodable record '{}': {}", key, err);
            let _ = storage.remove_item(key);
            None
        }
    }
}

pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freshness_window() {
        let record = StoredRecord {
            data: 42,
            saved_at: 1_000,
        };
        assert!(record.is_fresh(1_000 + AUTH_TTL_MS, AUTH_TTL_MS));
        assert!(!record.is_fresh(1_001 + AUTH_TTL_MS, AUTH_TTL_MS));
        // A record from the future is still fresh, not an underflow.
        assert!(record.is_fresh(500, AUTH_TTL_MS));
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = StoredRecord {
            data: vec!["a".to_string(), "b".to_string()],
            saved_at: 77,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: StoredRecord<Vec<String>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.data, record.data);
        assert_eq!(back.saved_at, 77);
    }
}
