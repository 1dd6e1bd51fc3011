//! In-memory store doubles for tests.
//!
//! They follow the same contracts as the PostgreSQL stores, including the typed
//! [`ModelError`] signals, and hash passwords with a low bcrypt cost.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use snippetbox_core::password::{hash_password_with_cost, verify_password};

use crate::errors::ModelError;
use crate::ids::{SnippetId, UserId};
use crate::snippets::{Snippet, SnippetStore};
use crate::users::{User, UserStore};

const TEST_COST: u32 = 4;

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct UserTable {
    next_id: i64,
    rows: BTreeMap<UserId, StoredUser>,
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: RwLock<UserTable>,
    unavailable: AtomicBool,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user directly, bypassing the duplicate check.
    pub async fn insert(&self, name: &str, email: &str, password: &str) -> UserId {
        let password_hash = hash_password_with_cost(password, TEST_COST)
            .unwrap_or_else(|e| panic!("hashing test password: {e}"));
        let mut table = self.table.write().await;
        table.next_id += 1;
        let id = UserId(table.next_id);
        table.rows.insert(
            id,
            StoredUser {
                user: User {
                    id,
                    name: name.to_string(),
                    email: email.to_string(),
                    created: Utc::now(),
                },
                password_hash,
            },
        );
        id
    }

    /// Deletes a user, simulating an account removed while a session is live.
    pub async fn remove(&self, id: UserId) -> bool {
        self.table.write().await.rows.remove(&id).is_some()
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// When set, every call fails with a database error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), ModelError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ModelError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, name: &str, email: &str, password: &str) -> Result<UserId, ModelError> {
        self.check_available()?;
        let taken = self
            .table
            .read()
            .await
            .rows
            .values()
            .any(|row| row.user.email == email);
        if taken {
            return Err(ModelError::DuplicateEmail);
        }
        Ok(self.insert(name, email, password).await)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, ModelError> {
        self.check_available()?;
        let table = self.table.read().await;
        let row = table
            .rows
            .values()
            .find(|row| row.user.email == email)
            .ok_or(ModelError::InvalidCredentials)?;

        if !verify_password(password, &row.password_hash)? {
            return Err(ModelError::InvalidCredentials);
        }
        Ok(row.user.id)
    }

    async fn exists(&self, id: UserId) -> Result<bool, ModelError> {
        self.check_available()?;
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn get(&self, id: UserId) -> Result<User, ModelError> {
        self.check_available()?;
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .map(|row| row.user.clone())
            .ok_or(ModelError::NoRecord)
    }

    async fn update_password(
        &self,
        id: UserId,
        current: &str,
        new: &str,
    ) -> Result<(), ModelError> {
        self.check_available()?;
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(ModelError::NoRecord)?;

        if !verify_password(current, &row.password_hash)? {
            return Err(ModelError::InvalidCredentials);
        }
        row.password_hash = hash_password_with_cost(new, TEST_COST)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SnippetTable {
    next_id: i64,
    rows: BTreeMap<SnippetId, Snippet>,
}

#[derive(Debug, Default)]
pub struct MemorySnippetStore {
    table: RwLock<SnippetTable>,
}

impl MemorySnippetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a snippet with explicit timestamps, e.g. one that has already expired.
    pub async fn insert(
        &self,
        title: &str,
        content: &str,
        created: DateTime<Utc>,
        expires: DateTime<Utc>,
    ) -> SnippetId {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let id = SnippetId(table.next_id);
        table.rows.insert(
            id,
            Snippet {
                id,
                title: title.to_string(),
                content: content.to_string(),
                created,
                expires,
            },
        );
        id
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

#[async_trait]
impl SnippetStore for MemorySnippetStore {
    async fn create(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> Result<SnippetId, ModelError> {
        let created = Utc::now();
        let expires = created + Duration::days(i64::from(expires_days));
        Ok(self.insert(title, content, created, expires).await)
    }

    async fn get(&self, id: SnippetId) -> Result<Snippet, ModelError> {
        let now = Utc::now();
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .filter(|snippet| !snippet.is_expired_at(now))
            .cloned()
            .ok_or(ModelError::NoRecord)
    }

    async fn latest(&self, limit: i64) -> Result<Vec<Snippet>, ModelError> {
        let now = Utc::now();
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .rev()
            .filter(|snippet| !snippet.is_expired_at(now))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = MemorySnippetStore::new();
        let id = store.create("T", "C", 7).await.unwrap();
        let snippet = store.get(id).await.unwrap();

        assert_eq!(snippet.title, "T");
        assert_eq!(snippet.content, "C");
        let lifetime = snippet.expires - snippet.created;
        assert_eq!(lifetime.num_days(), 7);
    }

    #[tokio::test]
    async fn test_expired_snippet_is_hidden() {
        let store = MemorySnippetStore::new();
        let now = Utc::now();
        let live = store.create("live", "body", 1).await.unwrap();
        let expired = store
            .insert("old", "body", now - Duration::days(8), now - Duration::days(1))
            .await;

        assert!(matches!(store.get(expired).await, Err(ModelError::NoRecord)));
        let latest = store.latest(10).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].id, live);
    }

    #[tokio::test]
    async fn test_latest_is_newest_first_and_limited() {
        let store = MemorySnippetStore::new();
        for i in 0..12 {
            store.create(&format!("s{i}"), "body", 365).await.unwrap();
        }

        let latest = store.latest(10).await.unwrap();
        assert_eq!(latest.len(), 10);
        assert_eq!(latest[0].title, "s11");
        assert_eq!(latest[9].title, "s2");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryUserStore::new();
        store.create("Alice", "alice@example.com", "pa55word").await.unwrap();

        let err = store
            .create("Other", "alice@example.com", "pa55word")
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateEmail));
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_authenticate_distinguishes_bad_credentials() {
        let store = MemoryUserStore::new();
        let id = store.insert("Alice", "alice@example.com", "pa55word").await;

        assert_eq!(store.authenticate("alice@example.com", "pa55word").await.unwrap(), id);
        assert!(matches!(
            store.authenticate("alice@example.com", "wrong").await,
            Err(ModelError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("nobody@example.com", "pa55word").await,
            Err(ModelError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_update_password_checks_current() {
        let store = MemoryUserStore::new();
        let id = store.insert("Alice", "alice@example.com", "pa55word").await;

        let err = store.update_password(id, "wrong", "newpa55word").await.unwrap_err();
        assert!(matches!(err, ModelError::InvalidCredentials));
        assert!(store.authenticate("alice@example.com", "pa55word").await.is_ok());

        store.update_password(id, "pa55word", "newpa55word").await.unwrap();
        assert!(store.authenticate("alice@example.com", "newpa55word").await.is_ok());

        let err = store
            .update_password(UserId(999), "pa55word", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::NoRecord));
    }

    #[tokio::test]
    async fn test_unavailable_store_returns_database_error() {
        let store = MemoryUserStore::new();
        let id = store.insert("Alice", "alice@example.com", "pa55word").await;
        store.set_unavailable(true);

        assert!(matches!(store.exists(id).await, Err(ModelError::Database(_))));

        store.set_unavailable(false);
        assert!(store.exists(id).await.unwrap());
        assert!(store.remove(id).await);
        assert!(!store.exists(id).await.unwrap());
    }
}
