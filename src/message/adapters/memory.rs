//! In-memory implementation of the `MessageStore` port.
//!
//! Keeps records in insertion order behind a single lock so every
//! find-and-modify runs as one critical section. Intended for tests and
//! local wiring; nothing survives the process.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::message::{
    domain::{Message, MessagePatch},
    ports::{
        MessageFilter, MessageStore, MessageStoreError, MessageStoreResult,
        PRIMARY_KEY_CONSTRAINT, SUBMISSION_KEY_CONSTRAINT,
    },
};

/// Thread-safe in-memory message store.
///
/// # Example
///
/// ```
/// use courier::message::adapters::memory::InMemoryMessageStore;
///
/// let store = InMemoryMessageStore::new();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl InMemoryMessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored messages.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_poisoned(err: impl std::fmt::Display) -> MessageStoreError {
    MessageStoreError::unavailable(std::io::Error::other(format!("lock poisoned: {err}")))
}

/// Returns the constraint `candidate` would violate among `messages`,
/// ignoring the record at `skip` (the one being rewritten).
fn violated_constraint(
    messages: &[Message],
    candidate: &Message,
    skip: Option<usize>,
) -> Option<&'static str> {
    let key = candidate.submission_key();
    messages
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != skip)
        .find_map(|(_, existing)| {
            if existing.id() == candidate.id() {
                Some(PRIMARY_KEY_CONSTRAINT)
            } else if existing.submission_key() == key {
                Some(SUBMISSION_KEY_CONSTRAINT)
            } else {
                None
            }
        })
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, message: &Message) -> MessageStoreResult<Message> {
        let mut guard = self.messages.write().map_err(lock_poisoned)?;

        if let Some(constraint) = violated_constraint(&guard, message, None) {
            return Err(MessageStoreError::duplicate_key(constraint));
        }

        guard.push(message.clone());
        Ok(message.clone())
    }

    async fn find_many(&self, filter: &MessageFilter) -> MessageStoreResult<Vec<Message>> {
        let guard = self.messages.read().map_err(lock_poisoned)?;
        Ok(guard
            .iter()
            .filter(|message| filter.matches(message))
            .cloned()
            .collect())
    }

    async fn find_one_and_update(
        &self,
        filter: &MessageFilter,
        patch: &MessagePatch,
        updated_at: DateTime<Utc>,
    ) -> MessageStoreResult<Option<Message>> {
        let mut guard = self.messages.write().map_err(lock_poisoned)?;

        let Some(index) = guard.iter().position(|message| filter.matches(message)) else {
            return Ok(None);
        };
        let Some(current) = guard.get(index) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        updated.apply_patch(patch, updated_at);
        if let Some(constraint) = violated_constraint(&guard, &updated, Some(index)) {
            return Err(MessageStoreError::duplicate_key(constraint));
        }

        if let Some(slot) = guard.get_mut(index) {
            *slot = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn find_one_and_delete(
        &self,
        filter: &MessageFilter,
    ) -> MessageStoreResult<Option<Message>> {
        let mut guard = self.messages.write().map_err(lock_poisoned)?;
        let removed = guard
            .iter()
            .position(|message| filter.matches(message))
            .map(|index| guard.remove(index));
        Ok(removed)
    }
}
