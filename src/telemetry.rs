//! Structured logging setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),
}

/// Installs a formatting subscriber filtered by `filter`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one stays in place.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `filter` is not a valid
/// directive list.
///
/// # Examples
///
/// ```
/// courier::telemetry::init_tracing("courier=debug").expect("valid filter");
/// let reinstalled = courier::telemetry::init_tracing("courier=info").expect("valid filter");
/// assert!(!reinstalled);
/// ```
pub fn init_tracing(filter: &str) -> Result<bool, TelemetryError> {
    let env_filter = EnvFilter::try_new(filter)?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .is_ok())
}
