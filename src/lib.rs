//! Courier: message records for a chat platform.
//!
//! The crate stores messages exchanged between users, optionally grouped
//! into chats, and exposes four named requests over a uniform response
//! envelope: list a chat, create a message, and update or delete a message
//! the requester sent.
//!
//! # Architecture
//!
//! Courier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: Concrete store implementations (in-memory, `PostgreSQL`)
//! - **Dispatch**: Request parsing and envelope shaping for a transport
//!
//! # Modules
//!
//! - [`message`]: Message records, storage, service, and dispatch
//! - [`config`]: Environment-driven service configuration
//! - [`telemetry`]: Structured logging setup
//! - [`bootstrap`]: Wiring a `PostgreSQL`-backed dispatcher from configuration

pub mod bootstrap;
pub mod config;
pub mod message;
pub mod telemetry;
