use std::sync::Arc;
use std::time::Duration;

use snippetbox_config::{AppConfig, ServerConfig};
use snippetbox_db::{PgSnippetStore, PgUserStore, init_db_pool, run_migrations};
use snippetbox_models::{SnippetStore, UserStore};
use snippetbox_session::{PostgresStore, SessionManager};

/// Dependencies shared by every handler and middleware.
///
/// Stores are trait objects so tests can swap in the in-memory implementations.
#[derive(Clone, Debug)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub snippets: Arc<dyn SnippetStore>,
    pub sessions: SessionManager,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        snippets: Arc<dyn SnippetStore>,
        sessions: SessionManager,
        config: ServerConfig,
    ) -> Self {
        Self {
            users,
            snippets,
            sessions,
            config,
        }
    }
}

/// Connects to PostgreSQL, applies migrations and starts the expired-session sweeper.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db_pool().await?;
    run_migrations(&pool).await?;

    let session_store = Arc::new(PostgresStore::new(pool.clone()));
    session_store
        .clone()
        .spawn_cleanup(Duration::from_secs(config.session.cleanup_interval_secs));

    Ok(AppState::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgSnippetStore::new(pool)),
        SessionManager::new(session_store, &config.session),
        config.server.clone(),
    ))
}
