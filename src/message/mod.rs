//! Message records for chat conversations.
//!
//! A message belongs to a sender and a recipient, optionally to a chat, and
//! may carry text content. Only the sender may update or remove a message;
//! anyone may list a chat. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The storage contract in [`ports`]
//! - In-memory and `PostgreSQL` stores in [`adapters`]
//! - Lifecycle orchestration in [`services`]
//! - Named request handling and the response envelope in [`dispatch`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use courier::message::{
//!     adapters::memory::InMemoryMessageStore,
//!     domain::{NewMessage, UserId},
//!     services::MessageService,
//! };
//! use mockable::DefaultClock;
//!
//! # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
//! let service = MessageService::new(Arc::new(InMemoryMessageStore::new()), Arc::new(DefaultClock));
//! let sender = UserId::new();
//! let created = service
//!     .create_message(NewMessage::new(sender, UserId::new()).with_content("hello"))
//!     .await
//!     .expect("message should be created");
//! assert_eq!(created.sender(), sender);
//! # });
//! ```

pub mod adapters;
pub mod dispatch;
pub mod domain;
pub mod ports;
pub mod services;
