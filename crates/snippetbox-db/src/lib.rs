//! # Snippetbox DB
//!
//! PostgreSQL connection pool, embedded migrations and the store
//! implementations backing the web application.
//!
//! # Example
//!
//! ```ignore
//! use snippetbox_db::{PgSnippetStore, PgUserStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! let users = PgUserStore::new(pool.clone());
//! ```

mod snippets;
mod users;

use std::env;

pub use snippets::PgSnippetStore;
pub use users::PgUserStore;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects to the database named by `DATABASE_URL`.
///
/// Call once at startup; the returned pool is cheap to clone into every store.
pub async fn init_db_pool() -> Result<PgPool, sqlx::Error> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;
    connect(&database_url).await
}

pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Applies the migrations embedded from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
