use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::SessionError;
use crate::store::{Record, SessionStore};

/// Process-local session store. Expired records are dropped lazily on load.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.records.read().await.contains_key(key)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<Record>, SessionError> {
        let now = Utc::now();
        {
            let records = self.records.read().await;
            match records.get(key) {
                None => return Ok(None),
                Some(record) if !record.is_expired_at(now) => return Ok(Some(record.clone())),
                Some(_) => {}
            }
        }

        self.records.write().await.remove(key);
        Ok(None)
    }

    async fn save(&self, key: &str, record: &Record) -> Result<(), SessionError> {
        self.records
            .write()
            .await
            .insert(key.to_string(), record.clone());
        Ok(())
    }

    async fn update(&self, key: &str, record: &Record) -> Result<bool, SessionError> {
        let mut records = self.records.write().await;
        match records.get_mut(key) {
            Some(existing) if !existing.is_expired_at(Utc::now()) => {
                *existing = record.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        self.records.write().await.remove(key);
        Ok(())
    }
}
