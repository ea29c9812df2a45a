//! `PostgreSQL` adapters for message persistence.

mod models;
mod schema;
mod store;

pub use store::{CREATE_MESSAGES_SQL, MessagePgPool, PostgresMessageStore};

#[cfg(test)]
pub(crate) use models::MessageRow;
#[cfg(test)]
pub(crate) use store::{map_write_error, row_to_message};
