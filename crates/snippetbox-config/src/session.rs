use crate::parse_flag;

/// Session cookie and storage settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Seconds a session stays valid after its last write.
    pub lifetime_secs: i64,
    /// Mark the cookie `Secure`. Only disable for plain-HTTP local development.
    pub secure: bool,
    /// How often expired rows are purged from the session table.
    pub cleanup_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "session".to_string(),
            lifetime_secs: 12 * 60 * 60, // 12 hours
            secure: true,
            cleanup_interval_secs: 300, // 5 minutes
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            cookie_name: lookup("SESSION_COOKIE_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.cookie_name),
            lifetime_secs: lookup("SESSION_LIFETIME_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs: &i64| *secs > 0)
                .unwrap_or(defaults.lifetime_secs),
            secure: parse_flag(lookup("SESSION_COOKIE_SECURE")).unwrap_or(defaults.secure),
            cleanup_interval_secs: lookup("SESSION_CLEANUP_INTERVAL_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(defaults.cleanup_interval_secs),
        }
    }
}
