//! # Snippetbox Config
//!
//! Configuration types for Snippetbox, loaded from environment variables.
//!
//! - [`server`]: listen address, debug mode, static asset directory
//! - [`session`]: session cookie and lifetime settings
//! - [`logging`]: log level and optional log directory
//!
//! Every config type offers `from_env()` and a `from_lookup()` variant that takes
//! an arbitrary key lookup, which keeps tests away from the process environment.
//!
//! # Example
//!
//! ```ignore
//! use snippetbox_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! println!("listening on {}", config.server.addr);
//! ```

pub mod logging;
pub mod server;
pub mod session;

// Re-export commonly used types at crate root
pub use logging::LogConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;

/// All configuration the server binary needs at startup.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub logging: LogConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server: ServerConfig::from_lookup(&lookup),
            session: SessionConfig::from_lookup(&lookup),
            logging: LogConfig::from_lookup(&lookup),
        }
    }
}

pub(crate) fn parse_flag(value: Option<String>) -> Option<bool> {
    value.map(|v| {
        let v = v.trim().to_lowercase();
        v == "true" || v == "1" || v == "yes"
    })
}
