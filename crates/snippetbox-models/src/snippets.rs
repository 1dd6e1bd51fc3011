//! Snippet records and the snippet store interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::errors::ModelError;
use crate::ids::SnippetId;

/// Number of snippets shown on the home page.
pub const LATEST_LIMIT: i64 = 10;

#[derive(Serialize, FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Snippet {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

/// Snippet persistence. Reads only ever return snippets that have not expired.
#[async_trait]
pub trait SnippetStore: Send + Sync + std::fmt::Debug {
    /// Stores a snippet expiring `expires_days` days from now.
    async fn create(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> Result<SnippetId, ModelError>;

    /// Returns [`ModelError::NoRecord`] for unknown or expired snippets.
    async fn get(&self, id: SnippetId) -> Result<Snippet, ModelError>;

    /// Most recently created live snippets, newest first.
    async fn latest(&self, limit: i64) -> Result<Vec<Snippet>, ModelError>;
}
