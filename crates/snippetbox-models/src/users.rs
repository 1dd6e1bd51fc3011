//! User records and the credential store interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::errors::ModelError;
use crate::ids::UserId;

/// A registered user. The password hash is never loaded into this record.
#[derive(Serialize, FromRow, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created: DateTime<Utc>,
}

/// Credential store used by the authentication handlers and middleware.
///
/// Implementations must be safe to share across requests; every method may be
/// called concurrently.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    /// Creates a user with a freshly hashed password.
    ///
    /// Returns [`ModelError::DuplicateEmail`] when the email is already registered.
    async fn create(&self, name: &str, email: &str, password: &str) -> Result<UserId, ModelError>;

    /// Verifies an email/password pair.
    ///
    /// Unknown emails and wrong passwords both yield [`ModelError::InvalidCredentials`].
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, ModelError>;

    async fn exists(&self, id: UserId) -> Result<bool, ModelError>;

    async fn get(&self, id: UserId) -> Result<User, ModelError>;

    /// Replaces the password after checking the current one.
    ///
    /// Returns [`ModelError::NoRecord`] for an unknown user and
    /// [`ModelError::InvalidCredentials`] when `current` does not match.
    async fn update_password(
        &self,
        id: UserId,
        current: &str,
        new: &str,
    ) -> Result<(), ModelError>;
}
