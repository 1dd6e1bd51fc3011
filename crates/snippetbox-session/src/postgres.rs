use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{PgPool, types::Json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::SessionError;
use crate::store::{Record, SessionStore};

/// Session store over the `sessions` table.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Deletes every expired row and returns how many were removed.
    pub async fn delete_expired(&self) -> Result<u64, SessionError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expiry <= NOW()")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Runs [`Self::delete_expired`] every `period` until the handle is aborted.
    pub fn spawn_cleanup(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                match self.delete_expired().await {
                    Ok(0) => {}
                    Ok(removed) => debug!(removed, "Deleted expired sessions"),
                    Err(e) => error!(error = %e, "Failed to delete expired sessions"),
                }
            }
        })
    }
}

#[async_trait]
impl SessionStore for PostgresStore {
    async fn load(&self, key: &str) -> Result<Option<Record>, SessionError> {
        let row: Option<(Json<HashMap<String, Value>>, DateTime<Utc>)> = sqlx::query_as(
            "SELECT data, expiry FROM sessions WHERE token = $1 AND expiry > NOW()",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(Json(data), expires_at)| Record { data, expires_at }))
    }

    async fn save(&self, key: &str, record: &Record) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, data, expiry)
            VALUES ($1, $2, $3)
            ON CONFLICT (token) DO UPDATE SET data = EXCLUDED.data, expiry = EXCLUDED.expiry
            "#,
        )
        .bind(key)
        .bind(Json(&record.data))
        .bind(record.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, key: &str, record: &Record) -> Result<bool, SessionError> {
        let result = sqlx::query(
            "UPDATE sessions SET data = $2, expiry = $3 WHERE token = $1 AND expiry > NOW()",
        )
        .bind(key)
        .bind(Json(&record.data))
        .bind(record.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
