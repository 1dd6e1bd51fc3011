use thiserror::Error;

/// Errors returned by the user and snippet stores.
///
/// The first three variants are expected outcomes that handlers branch on.
/// Anything else is an infrastructure failure and surfaces as a server error.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no matching record found")]
    NoRecord,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("duplicate email")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),
}
