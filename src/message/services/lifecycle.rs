//! Service layer for the message lifecycle: create, list by chat, update,
//! and remove.
//!
//! Ownership is never checked by reading first. Update and remove hand the
//! store a filter on both the message identifier and the requester as
//! sender, so the check and the mutation are one atomic store operation.
//! When that filter matches nothing the caller learns only that the message
//! was not found or not theirs.

use crate::message::{
    domain::{ChatId, Message, MessageId, MessagePatch, NewMessage, UserId},
    ports::{MessageFilter, MessageStore, MessageStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for message lifecycle operations.
#[derive(Debug, Error)]
pub enum MessageServiceError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate message: {0}")]
    DuplicateConflict(String),

    /// The message does not exist or the requester did not send it.
    #[error("message {0} not found or not owned by the requester")]
    NotFoundOrForbidden(MessageId),

    /// The store failed for reasons unrelated to message policy.
    #[error(transparent)]
    StoreUnavailable(MessageStoreError),
}

impl From<MessageStoreError> for MessageServiceError {
    fn from(err: MessageStoreError) -> Self {
        match err {
            MessageStoreError::DuplicateKey { .. } => Self::DuplicateConflict(err.to_string()),
            MessageStoreError::Unavailable(_) => Self::StoreUnavailable(err),
        }
    }
}

/// Result type for message service operations.
pub type MessageServiceResult<T> = Result<T, MessageServiceError>;

/// Message lifecycle orchestration service.
///
/// Holds only shared handles, so clones are cheap and every call is an
/// independent unit of work.
pub struct MessageService<S, C>
where
    S: MessageStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for MessageService<S, C>
where
    S: MessageStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> MessageService<S, C>
where
    S: MessageStore,
    C: Clock + Send + Sync,
{
    /// Creates a new message service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns every message in `chat_id`, in store order.
    ///
    /// Any caller may read any chat. An unknown chat yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::StoreUnavailable`] when the lookup
    /// fails.
    pub async fn get_messages_by_chat_id(
        &self,
        chat_id: ChatId,
    ) -> MessageServiceResult<Vec<Message>> {
        let messages = self.store.find_many(&MessageFilter::chat(chat_id)).await?;
        debug!(%chat_id, count = messages.len(), "listed chat messages");
        Ok(messages)
    }

    /// Persists a new message and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::DuplicateConflict`] when the store
    /// reports a duplicate key, or [`MessageServiceError::StoreUnavailable`]
    /// for any other store failure.
    pub async fn create_message(&self, new_message: NewMessage) -> MessageServiceResult<Message> {
        let message = Message::create(new_message, &*self.clock);
        let stored = self.store.insert(&message).await.inspect_err(|err| {
            if matches!(err, MessageStoreError::DuplicateKey { .. }) {
                warn!(sender = %message.sender(), error = %err, "rejected duplicate message");
            }
        })?;
        info!(message_id = %stored.id(), sender = %stored.sender(), "message created");
        Ok(stored)
    }

    /// Merges `patch` into the message `id` when `requester` sent it.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::NotFoundOrForbidden`] when no message
    /// matches both `id` and `requester`,
    /// [`MessageServiceError::DuplicateConflict`] when the merged record
    /// collides with another message, or
    /// [`MessageServiceError::StoreUnavailable`] for store failures.
    pub async fn update_message(
        &self,
        id: MessageId,
        requester: UserId,
        patch: &MessagePatch,
    ) -> MessageServiceResult<Message> {
        let updated = self
            .store
            .find_one_and_update(&MessageFilter::owned(id, requester), patch, self.clock.utc())
            .await?
            .ok_or(MessageServiceError::NotFoundOrForbidden(id))?;
        info!(message_id = %id, "message updated");
        Ok(updated)
    }

    /// Deletes the message `id` when `requester` sent it.
    ///
    /// Deletion is not idempotent: removing an already removed message
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::NotFoundOrForbidden`] when no message
    /// matches both `id` and `requester`, or
    /// [`MessageServiceError::StoreUnavailable`] for store failures.
    pub async fn remove_message(&self, id: MessageId, requester: UserId) -> MessageServiceResult<()> {
        self.store
            .find_one_and_delete(&MessageFilter::owned(id, requester))
            .await?
            .ok_or(MessageServiceError::NotFoundOrForbidden(id))?;
        info!(message_id = %id, "message removed");
        Ok(())
    }
}
