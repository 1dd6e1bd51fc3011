use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::SessionError;
use crate::store::SessionStore;
use crate::token::{generate_token, hash_token};

/// Session key holding the per-session CSRF token.
pub const CSRF_TOKEN_KEY: &str = "csrf_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Unmodified,
    Modified,
    Destroyed,
}

#[derive(Debug)]
struct Inner {
    token: String,
    data: HashMap<String, Value>,
    status: Status,
    /// The store already holds a row for `token`.
    stored: bool,
}

/// Point-in-time copy of a session, taken at commit.
#[derive(Debug)]
pub(crate) struct Snapshot {
    pub(crate) token: String,
    pub(crate) data: HashMap<String, Value>,
    pub(crate) status: Status,
    pub(crate) stored: bool,
}

/// Handle to the session of the request in flight.
///
/// Clones share state, so middleware and the handler see each other's writes.
/// Changes stay in memory until [`crate::SessionManager::commit`] runs, except
/// [`Session::renew_token`] and [`Session::destroy`], which invalidate the old
/// token in the store immediately.
#[derive(Clone, Debug)]
pub struct Session {
    inner: Arc<Mutex<Inner>>,
    store: Arc<dyn SessionStore>,
}

impl Session {
    fn with_inner(store: Arc<dyn SessionStore>, inner: Inner) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
            store,
        }
    }

    /// Session backed by an existing store record.
    pub(crate) fn new(
        store: Arc<dyn SessionStore>,
        token: String,
        data: HashMap<String, Value>,
    ) -> Self {
        Self::with_inner(
            store,
            Inner {
                token,
                data,
                status: Status::Unmodified,
                stored: true,
            },
        )
    }

    pub(crate) fn fresh(store: Arc<dyn SessionStore>) -> Self {
        Self::with_inner(
            store,
            Inner {
                token: generate_token(),
                data: HashMap::new(),
                status: Status::Unmodified,
                stored: false,
            },
        )
    }

    pub(crate) async fn snapshot(&self) -> Snapshot {
        let inner = self.inner.lock().await;
        Snapshot {
            token: inner.token.clone(),
            data: inner.data.clone(),
            status: inner.status,
            stored: inner.stored,
        }
    }

    /// Current cookie token.
    pub async fn token(&self) -> String {
        self.inner.lock().await.token.clone()
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        let inner = self.inner.lock().await;
        inner
            .data
            .get(key)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
            .map_err(SessionError::from)
    }

    /// Integer value for `key`; `None` when absent or not an integer.
    pub async fn get_int(&self, key: &str) -> Option<i64> {
        self.inner.lock().await.data.get(key).and_then(Value::as_i64)
    }

    pub async fn get_string(&self, key: &str) -> Option<String> {
        self.inner
            .lock()
            .await
            .data
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.inner.lock().await.data.contains_key(key)
    }

    pub async fn put<T: Serialize>(&self, key: &str, value: T) -> Result<(), SessionError> {
        let value = serde_json::to_value(value)?;
        let mut inner = self.inner.lock().await;
        inner.data.insert(key.to_string(), value);
        inner.status = Status::Modified;
        Ok(())
    }

    /// Removes `key` and returns its value.
    pub async fn pop<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        let value = {
            let mut inner = self.inner.lock().await;
            let value = inner.data.remove(key);
            if value.is_some() {
                inner.status = Status::Modified;
            }
            value
        };
        value
            .map(serde_json::from_value)
            .transpose()
            .map_err(SessionError::from)
    }

    /// One-shot string read, e.g. for flash messages. Non-string values are discarded.
    pub async fn pop_string(&self, key: &str) -> Option<String> {
        self.pop::<Value>(key)
            .await
            .ok()
            .flatten()
            .and_then(|value| value.as_str().map(str::to_string))
    }

    pub async fn remove(&self, key: &str) {
        let mut inner = self.inner.lock().await;
        if inner.data.remove(key).is_some() {
            inner.status = Status::Modified;
        }
    }

    /// Replaces the token while keeping the data.
    ///
    /// The old token is deleted from the store before the new one is issued, so
    /// it stops being accepted before the new cookie reaches the client.
    pub async fn renew_token(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        self.store.delete(&hash_token(&inner.token)).await?;
        inner.token = generate_token();
        inner.stored = false;
        inner.status = Status::Modified;
        Ok(())
    }

    /// Deletes the session from the store and clears all data.
    /// The commit step then expires the client cookie.
    pub async fn destroy(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        self.store.delete(&hash_token(&inner.token)).await?;
        inner.data.clear();
        inner.token = generate_token();
        inner.stored = false;
        inner.status = Status::Destroyed;
        Ok(())
    }

    /// The session's CSRF token, created on first use.
    pub async fn csrf_token(&self) -> String {
        let mut inner = self.inner.lock().await;
        if let Some(token) = inner.data.get(CSRF_TOKEN_KEY).and_then(Value::as_str) {
            return token.to_string();
        }

        let token = generate_token();
        inner
            .data
            .insert(CSRF_TOKEN_KEY.to_string(), Value::String(token.clone()));
        inner.status = Status::Modified;
        token
    }

    /// The session's CSRF token if one was already issued.
    pub async fn existing_csrf_token(&self) -> Option<String> {
        self.get_string(CSRF_TOKEN_KEY).await
    }
}
