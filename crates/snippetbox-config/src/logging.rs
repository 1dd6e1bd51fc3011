#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Default level for the snippetbox crates when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for rotated log files; console only when unset.
    pub dir: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
        }
    }
}
