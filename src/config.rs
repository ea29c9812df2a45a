//! Environment-driven service configuration.
//!
//! Values are read from the process environment after an optional `.env`
//! file has been loaded. Only the database URL is required.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "COURIER_DATABASE_URL";
/// Variable holding the maximum pool size.
pub const POOL_SIZE_VAR: &str = "COURIER_DB_POOL_SIZE";
/// Variable holding the connection checkout timeout in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "COURIER_DB_CONNECT_TIMEOUT_SECS";
/// Variable holding the tracing filter directive.
pub const LOG_FILTER_VAR: &str = "COURIER_LOG";

/// Pool size used when none is configured.
pub const DEFAULT_POOL_SIZE: u32 = 8;
/// Checkout timeout used when none is configured.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Filter directive used when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "courier=info";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent or blank.
    #[error("missing required configuration: {0}")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("invalid value for {key}: {value:?}")]
    Invalid {
        /// Offending variable.
        key: &'static str,
        /// Raw value that was rejected.
        value: String,
    },

    /// A `.env` file exists but could not be read.
    #[error("failed to load .env file: {0}")]
    EnvFile(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings needed to run the message service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    database_url: String,
    pool_size: u32,
    connect_timeout: Duration,
    log_filter: String,
}

impl ServiceConfig {
    /// Creates a configuration with default pool and logging settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }

    /// Sets the maximum number of pooled connections.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Sets the connection checkout timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Sets the tracing filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, log_filter: impl Into<String>) -> Self {
        self.log_filter = log_filter.into();
        self
    }

    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory, if present, is applied first
    /// without overriding variables already set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the database URL is absent,
    /// [`ConfigError::Invalid`] when a numeric setting cannot be parsed or is
    /// zero, or [`ConfigError::EnvFile`] when a `.env` file is unreadable.
    pub fn from_env() -> ConfigResult<Self> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            // Deployed environments usually have no .env file.
            Err(err) if err.not_found() => {}
            Err(err) => return Err(ConfigError::EnvFile(err.to_string())),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// See [`ServiceConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(DATABASE_URL_VAR).ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let mut config = Self::new(database_url);

        if let Some(raw) = read(POOL_SIZE_VAR) {
            config.pool_size = parse_positive(POOL_SIZE_VAR, raw)?;
        }
        if let Some(raw) = read(CONNECT_TIMEOUT_VAR) {
            config.connect_timeout =
                Duration::from_secs(parse_positive(CONNECT_TIMEOUT_VAR, raw)?.into());
        }
        if let Some(filter) = read(LOG_FILTER_VAR) {
            config.log_filter = filter;
        }
        Ok(config)
    }

    /// Returns the `PostgreSQL` connection URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns the connection checkout timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the tracing filter directive.
    ///
    /// [`crate::bootstrap::build_dispatcher`] installs it through
    /// [`crate::telemetry::init_tracing`].
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}

fn parse_positive(key: &'static str, raw: String) -> ConfigResult<u32> {
    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}
