//! Store port for message persistence.
//!
//! Mirrors a document store: records are inserted whole, read by filter, and
//! amended or removed through atomic find-and-modify primitives. Ownership
//! checks ride on those primitives, so implementations must evaluate the
//! filter and apply the mutation as one unit.

use crate::message::domain::{ChatId, Message, MessageId, MessagePatch, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Constraint reported when a message identifier is reused.
pub const PRIMARY_KEY_CONSTRAINT: &str = "messages_pkey";

/// Constraint reported when a sender repeats a submission.
///
/// Matches the unique index in the `PostgreSQL` schema so every store names
/// the violation the same way.
pub const SUBMISSION_KEY_CONSTRAINT: &str = "idx_messages_submission_unique";

/// Result type for message store operations.
pub type MessageStoreResult<T> = Result<T, MessageStoreError>;

/// Message persistence contract.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - message identifiers are unique
/// - the submission key (sender, chat, content) is unique, see
///   [`Message::submission_key`]
/// - `find_one_and_update` and `find_one_and_delete` are atomic with respect
///   to concurrent callers
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persists a new message and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::DuplicateKey`] when a uniqueness
    /// constraint is violated, or [`MessageStoreError::Unavailable`] for any
    /// other storage failure.
    async fn insert(&self, message: &Message) -> MessageStoreResult<Message>;

    /// Returns every message matching `filter` in store order.
    ///
    /// Returns an empty vector when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::Unavailable`] when the query fails.
    async fn find_many(&self, filter: &MessageFilter) -> MessageStoreResult<Vec<Message>>;

    /// Applies `patch` to the first message matching `filter`.
    ///
    /// Returns the updated record, or `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::DuplicateKey`] when the merged record
    /// collides with another message, or [`MessageStoreError::Unavailable`]
    /// for any other storage failure.
    async fn find_one_and_update(
        &self,
        filter: &MessageFilter,
        patch: &MessagePatch,
        updated_at: DateTime<Utc>,
    ) -> MessageStoreResult<Option<Message>>;

    /// Deletes the first message matching `filter`.
    ///
    /// Returns the removed record, or `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::Unavailable`] when the delete fails.
    async fn find_one_and_delete(
        &self,
        filter: &MessageFilter,
    ) -> MessageStoreResult<Option<Message>>;
}

/// Conjunction of equality clauses over message fields.
///
/// A filter with no clauses matches every message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageFilter {
    id: Option<MessageId>,
    sender: Option<UserId>,
    chat_id: Option<ChatId>,
}

impl MessageFilter {
    /// Matches every message in `chat_id`.
    #[must_use]
    pub const fn chat(chat_id: ChatId) -> Self {
        Self {
            id: None,
            sender: None,
            chat_id: Some(chat_id),
        }
    }

    /// Matches the message `id` only when `sender` authored it.
    #[must_use]
    pub const fn owned(id: MessageId, sender: UserId) -> Self {
        Self {
            id: Some(id),
            sender: Some(sender),
            chat_id: None,
        }
    }

    /// Returns the identifier clause, if set.
    #[must_use]
    pub const fn id(&self) -> Option<MessageId> {
        self.id
    }

    /// Returns the sender clause, if set.
    #[must_use]
    pub const fn sender(&self) -> Option<UserId> {
        self.sender
    }

    /// Returns the chat clause, if set.
    #[must_use]
    pub const fn chat_id(&self) -> Option<ChatId> {
        self.chat_id
    }

    /// Returns `true` when `message` satisfies every clause.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        self.id.is_none_or(|id| id == message.id())
            && self.sender.is_none_or(|sender| sender == message.sender())
            && self
                .chat_id
                .is_none_or(|chat_id| Some(chat_id) == message.chat_id())
    }
}

/// Errors returned by message store implementations.
#[derive(Debug, Clone, Error)]
pub enum MessageStoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate key violates unique constraint '{constraint}'")]
    DuplicateKey {
        /// Name of the violated constraint.
        constraint: String,
    },

    /// Any other storage-layer failure.
    #[error("message store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessageStoreError {
    /// Creates a duplicate-key error for the named constraint.
    #[must_use]
    pub fn duplicate_key(constraint: impl Into<String>) -> Self {
        Self::DuplicateKey {
            constraint: constraint.into(),
        }
    }

    /// Wraps a storage failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
