use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("session data could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}
