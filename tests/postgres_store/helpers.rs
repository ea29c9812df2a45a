//! Shared helpers for `PostgreSQL` store integration tests.

use courier::bootstrap::build_pool;
use courier::config::ServiceConfig;
use courier::message::{
    adapters::postgres::{CREATE_MESSAGES_SQL, PostgresMessageStore},
    domain::{ChatId, Message, NewMessage, UserId},
};
use diesel::connection::SimpleConnection;
use mockable::DefaultClock;
use rstest::fixture;
use std::env;
use std::io;
use std::sync::Mutex;
use tokio::runtime::Runtime;

/// Variable naming the database the suite runs against.
pub const TEST_DATABASE_URL_VAR: &str = "COURIER_TEST_DATABASE_URL";

static SCHEMA_APPLIED: Mutex<bool> = Mutex::new(false);

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
}

/// Returns the test database configuration, or `None` when the suite
/// should be skipped.
#[must_use]
pub fn test_config() -> Option<ServiceConfig> {
    env::var(TEST_DATABASE_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .map(|url| ServiceConfig::new(url).with_pool_size(4))
}

/// Connects to the test database and ensures the schema exists.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or the schema fails.
pub fn connect(config: &ServiceConfig) -> Result<PostgresMessageStore, eyre::Report> {
    let pool = build_pool(config)?;
    let mut applied = SCHEMA_APPLIED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if !*applied {
        pool.get()?.batch_execute(CREATE_MESSAGES_SQL)?;
        *applied = true;
    }
    Ok(PostgresMessageStore::new(pool))
}

/// Provides a connected store, or `None` when no test database is set.
#[fixture]
pub fn store() -> Option<PostgresMessageStore> {
    test_config().map(|config| connect(&config).expect("test database should be reachable"))
}

/// Builds an unsaved message in `chat_id` from `sender`.
#[must_use]
pub fn message_in(chat_id: ChatId, sender: UserId, content: &str) -> Message {
    Message::create(
        NewMessage::new(sender, UserId::new())
            .with_chat_id(chat_id)
            .with_content(content),
        &DefaultClock,
    )
}
