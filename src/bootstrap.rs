//! Wiring a `PostgreSQL`-backed dispatcher from configuration.

use crate::config::ServiceConfig;
use crate::message::{
    adapters::postgres::{MessagePgPool, PostgresMessageStore},
    dispatch::MessageDispatcher,
    ports::MessageStoreError,
    services::MessageService,
};
use crate::telemetry::{self, TelemetryError};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::info;

/// Dispatcher type produced by [`build_dispatcher`].
pub type PgMessageDispatcher = MessageDispatcher<PostgresMessageStore, DefaultClock>;

/// Errors raised while assembling the service.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The connection pool could not be established.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),

    /// The messages schema could not be applied.
    #[error("failed to apply message schema: {0}")]
    Schema(#[from] MessageStoreError),

    /// The blocking pool setup task did not complete.
    #[error("connection pool setup task failed: {0}")]
    Join(#[from] JoinError),

    /// The configured log filter was rejected.
    #[error("failed to initialize logging: {0}")]
    Telemetry(#[from] TelemetryError),
}

/// Builds a connection pool sized and timed by `config`.
///
/// This blocks while the initial connections are opened.
///
/// # Errors
///
/// Returns [`BootstrapError::Pool`] when connections cannot be opened within
/// the configured timeout.
pub fn build_pool(config: &ServiceConfig) -> Result<MessagePgPool, BootstrapError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    let pool = Pool::builder()
        .max_size(config.pool_size())
        .connection_timeout(config.connect_timeout())
        .build(manager)?;
    Ok(pool)
}

/// Installs logging from the configured filter, connects to `PostgreSQL`,
/// ensures the schema exists, and returns a ready dispatcher.
///
/// An already installed global subscriber is left in place.
///
/// # Errors
///
/// Returns [`BootstrapError::Telemetry`] for an invalid log filter, before
/// any connection is attempted. Otherwise returns [`BootstrapError`] when the
/// pool cannot be built or the schema cannot be applied.
pub async fn build_dispatcher(config: &ServiceConfig) -> Result<PgMessageDispatcher, BootstrapError> {
    telemetry::init_tracing(config.log_filter())?;
    let pool_config = config.clone();
    let pool = tokio::task::spawn_blocking(move || build_pool(&pool_config)).await??;
    let store = PostgresMessageStore::new(pool);
    store.apply_schema().await?;
    info!(pool_size = config.pool_size(), "message store ready");

    let service = MessageService::new(Arc::new(store), Arc::new(DefaultClock));
    Ok(MessageDispatcher::new(service))
}
