use crate::parse_flag;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub addr: String,
    /// Expose error details and panic messages in 500 responses.
    pub debug: bool,
    /// Directory served under `/static`.
    pub static_dir: String,
    /// Requests still without a response after this many seconds get a 408.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:4000".to_string(),
            debug: false,
            static_dir: "./ui/static".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            addr: lookup("ADDR").unwrap_or(defaults.addr),
            debug: parse_flag(lookup("DEBUG")).unwrap_or(defaults.debug),
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}
