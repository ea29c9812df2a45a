//! Port contracts for message persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by message services.

pub mod store;

pub use store::{
    MessageFilter, MessageStore, MessageStoreError, MessageStoreResult, PRIMARY_KEY_CONSTRAINT,
    SUBMISSION_KEY_CONSTRAINT,
};
