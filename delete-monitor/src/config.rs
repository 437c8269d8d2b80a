//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to the legacy unprefixed names (`DB_NAME`, `DB_HOST`, ...) with warning logs.

use sqlx::postgres::PgConnectOptions;
use std::time::Duration;

/// Get an environment variable with fallback to a legacy name
///
/// If the new variable name is set, returns its value.
/// If only the old (legacy) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use delete_monitor::config::get_env_with_fallback;
///
/// let host = get_env_with_fallback("DELETE_MONITOR_DB_HOST", "DB_HOST");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Falls back to `default` when neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database name
    pub name: String,
    /// User name
    pub user: String,
    /// Password
    pub password: String,
    /// Host
    pub host: String,
    /// Port
    pub port: u16,
    /// Maximum time to wait for a pooled connection.
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Load database configuration from environment variables.
    pub fn from_env() -> Self {
        let acquire_timeout_secs = get_env_with_fallback_parse(
            "DELETE_MONITOR_DB_ACQUIRE_TIMEOUT_SECS",
            "DB_ACQUIRE_TIMEOUT_SECS",
            5u64,
        );
        Self {
            name: get_env_with_fallback_or("DELETE_MONITOR_DB_NAME", "DB_NAME", "file_monitor"),
            user: get_env_with_fallback_or("DELETE_MONITOR_DB_USER", "DB_USER", "postgres"),
            password: get_env_with_fallback_or(
                "DELETE_MONITOR_DB_PASSWORD",
                "DB_PASSWORD",
                "yourpassword",
            ),
            host: get_env_with_fallback_or("DELETE_MONITOR_DB_HOST", "DB_HOST", "localhost"),
            port: get_env_with_fallback_parse("DELETE_MONITOR_DB_PORT", "DB_PORT", 5432),
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        }
    }

    /// Builds the PostgreSQL connect options.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

/// Relay pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    /// Timeout for `GET {site}/{date}`.
    pub fetch_timeout: Duration,
    /// Timeout for `POST {return_url}`.
    pub dispatch_timeout: Duration,
    /// Maximum number of relay jobs waiting in the queue.
    pub queue_capacity: usize,
    /// Maximum number of relays fetching or dispatching at the same time.
    pub max_concurrent_relays: usize,
    /// Maximum time in-flight relays may take to finish on shutdown.
    pub drain_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(10),
            dispatch_timeout: Duration::from_secs(5),
            queue_capacity: 100,
            max_concurrent_relays: 8,
            drain_timeout: Duration::from_secs(30),
        }
    }
}

impl RelayConfig {
    /// Load relay configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let fetch_timeout_secs = get_env_with_fallback_parse(
            "DELETE_MONITOR_FETCH_TIMEOUT_SECS",
            "FETCH_TIMEOUT_SECS",
            defaults.fetch_timeout.as_secs(),
        );
        let dispatch_timeout_secs = get_env_with_fallback_parse(
            "DELETE_MONITOR_DISPATCH_TIMEOUT_SECS",
            "DISPATCH_TIMEOUT_SECS",
            defaults.dispatch_timeout.as_secs(),
        );
        let queue_capacity = get_env_with_fallback_parse(
            "DELETE_MONITOR_RELAY_QUEUE_CAPACITY",
            "RELAY_QUEUE_CAPACITY",
            defaults.queue_capacity,
        );
        let max_concurrent_relays = get_env_with_fallback_parse(
            "DELETE_MONITOR_MAX_CONCURRENT_RELAYS",
            "MAX_CONCURRENT_RELAYS",
            defaults.max_concurrent_relays,
        );
        let drain_timeout_secs = get_env_with_fallback_parse(
            "DELETE_MONITOR_RELAY_DRAIN_TIMEOUT_SECS",
            "RELAY_DRAIN_TIMEOUT_SECS",
            defaults.drain_timeout.as_secs(),
        );

        Self {
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            dispatch_timeout: Duration::from_secs(dispatch_timeout_secs),
            // mpsc::channel panics on zero capacity
            queue_capacity: queue_capacity.max(1),
            // a zero-permit semaphore would never start a relay
            max_concurrent_relays: max_concurrent_relays.max(1),
            drain_timeout: Duration::from_secs(drain_timeout_secs),
        }
    }
}
