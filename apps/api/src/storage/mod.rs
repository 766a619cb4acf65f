//! Key-value string store for user state.
//!
//! Values are JSON strings. Every typed read or write goes through
//! `read_json` / `write_json`, which never fail: a malformed or unreadable
//! value reads as absent and a failed write is logged and dropped.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const SAVED_KEY: &str = "job-notification-tracker-saved";
pub const PREFERENCES_KEY: &str = "jobTrackerPreferences";
const DIGEST_KEY_PREFIX: &str = "jobTrackerDigest_";

pub fn digest_key(date: NaiveDate) -> String {
    format!("{DIGEST_KEY_PREFIX}{}", date.format("%Y-%m-%d"))
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Raw string store. Backends only move strings; JSON handling lives in the helpers below.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads and decodes `key`. Any failure reads as `None`.
pub async fn read_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Store read failed for '{key}': {e}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring malformed value for '{key}': {e}");
            None
        }
    }
}

/// Encodes and writes `value`. Failures are logged and swallowed.
pub async fn write_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Could not encode value for '{key}': {e}");
            return;
        }
    };
    if let Err(e) = store.set(key, &raw).await {
        warn!("Store write failed for '{key}': {e}");
    }
}

pub async fn remove_key(store: &dyn KvStore, key: &str) {
    if let Err(e) = store.remove(key).await {
        warn!("Store remove failed for '{key}': {e}");
    }
}
