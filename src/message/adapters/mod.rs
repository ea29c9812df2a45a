//! Persistence adapters for the message module.
//!
//! Concrete implementations of the [`MessageStore`] port:
//!
//! - [`memory::InMemoryMessageStore`]: thread-safe in-memory storage for tests
//!   and local wiring
//! - [`postgres::PostgresMessageStore`]: `PostgreSQL` persistence using Diesel
//!
//! [`MessageStore`]: crate::message::ports::MessageStore

pub mod memory;
pub mod postgres;
