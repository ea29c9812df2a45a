//! The message record and the payloads that create and amend it.

use super::{ChatId, MessageId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A chat message authored by one user for another.
///
/// # Invariants
///
/// - `id`, `sender`, and `recipient` never change after creation
/// - only `content` and `chat_id` are amended, via [`MessagePatch`]
/// - `updated_at` is never earlier than `created_at`
///
/// # Examples
///
/// ```
/// use courier::message::domain::{ChatId, Message, NewMessage, UserId};
/// use mockable::DefaultClock;
///
/// let sender = UserId::new();
/// let new_message = NewMessage::new(sender, UserId::new())
///     .with_chat_id(ChatId::new())
///     .with_content("Hello!");
/// let message = Message::create(new_message, &DefaultClock);
///
/// assert_eq!(message.sender(), sender);
/// assert_eq!(message.content(), Some("Hello!"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    id: MessageId,
    sender: UserId,
    recipient: UserId,
    chat_id: Option<ChatId>,
    content: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Authoring user.
    pub sender: UserId,
    /// Receiving user.
    pub recipient: UserId,
    /// Conversation the message belongs to, if any.
    pub chat_id: Option<ChatId>,
    /// Text payload, if any.
    pub content: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new message with a fresh identifier and clock timestamps.
    #[must_use]
    pub fn create(new_message: NewMessage, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let NewMessage {
            sender,
            recipient,
            chat_id,
            content,
        } = new_message;

        Self {
            id: MessageId::new(),
            sender,
            recipient,
            chat_id,
            content,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            sender: data.sender,
            recipient: data.recipient,
            chat_id: data.chat_id,
            content: data.content,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the authoring user.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.sender
    }

    /// Returns the receiving user.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }

    /// Returns the chat this message belongs to, if any.
    #[must_use]
    pub const fn chat_id(&self) -> Option<ChatId> {
        self.chat_id
    }

    /// Returns the text payload, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the key stores use to reject duplicate submissions.
    #[must_use]
    pub fn submission_key(&self) -> SubmissionKey {
        SubmissionKey {
            sender: self.sender,
            chat_id: self.chat_id,
            content: self.content.clone(),
        }
    }

    /// Merges the fields present in `patch` and stamps `updated_at`.
    pub fn apply_patch(&mut self, patch: &MessagePatch, updated_at: DateTime<Utc>) {
        if let Some(content) = patch.content() {
            self.content = Some(content.to_owned());
        }
        if let Some(chat_id) = patch.chat_id() {
            self.chat_id = Some(chat_id);
        }
        self.updated_at = updated_at;
    }
}

/// Fields that together must be unique across stored messages.
///
/// Absent values compare equal, so two content-less messages from the same
/// sender outside any chat collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionKey {
    sender: UserId,
    chat_id: Option<ChatId>,
    content: Option<String>,
}

/// Payload for creating a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewMessage {
    sender: UserId,
    recipient: UserId,
    #[serde(default)]
    chat_id: Option<ChatId>,
    #[serde(default)]
    content: Option<String>,
}

impl NewMessage {
    /// Creates a payload with the required sender and recipient.
    #[must_use]
    pub const fn new(sender: UserId, recipient: UserId) -> Self {
        Self {
            sender,
            recipient,
            chat_id: None,
            content: None,
        }
    }

    /// Sets the chat the message belongs to.
    #[must_use]
    pub const fn with_chat_id(mut self, chat_id: ChatId) -> Self {
        self.chat_id = Some(chat_id);
        self
    }

    /// Sets the text payload.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Returns the authoring user.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.sender
    }

    /// Returns the receiving user.
    #[must_use]
    pub const fn recipient(&self) -> UserId {
        self.recipient
    }
}

/// Partial update for a message; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MessagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chat_id: Option<ChatId>,
}

impl MessagePatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the text payload.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Moves the message to another chat.
    #[must_use]
    pub const fn with_chat_id(mut self, chat_id: ChatId) -> Self {
        self.chat_id = Some(chat_id);
        self
    }

    /// Returns the replacement content, if set.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the replacement chat, if set.
    #[must_use]
    pub const fn chat_id(&self) -> Option<ChatId> {
        self.chat_id
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_none() && self.chat_id.is_none()
    }
}
