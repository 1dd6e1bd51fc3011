use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::SessionError;

/// Persisted session state.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub data: HashMap<String, Value>,
    pub expires_at: DateTime<Utc>,
}

impl Record {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Backing storage for sessions.
///
/// `key` is always the hashed token (see [`crate::token::hash_token`]).
/// Implementations synchronize internally; every method may run concurrently.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Returns the record for `key`, or `None` when unknown or expired.
    async fn load(&self, key: &str) -> Result<Option<Record>, SessionError>;

    /// Inserts or replaces the record for `key`.
    async fn save(&self, key: &str, record: &Record) -> Result<(), SessionError>;

    /// Replaces the record for `key` only if a live one exists, returning
    /// whether it did. Never creates a row, so a token revoked by another
    /// request stays revoked.
    async fn update(&self, key: &str, record: &Record) -> Result<bool, SessionError>;

    /// Removes `key`. Deleting an unknown key is not an error.
    async fn delete(&self, key: &str) -> Result<(), SessionError>;
}
