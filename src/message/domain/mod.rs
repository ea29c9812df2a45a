//! Domain model for chat message records.
//!
//! Pure types with no infrastructure dependencies: identifiers, the
//! [`Message`] record, and the create and patch payloads accepted from
//! callers.

mod error;
mod ids;
mod message;

pub use error::MessageDomainError;
pub use ids::{ChatId, MessageId, UserId};
pub use message::{Message, MessagePatch, NewMessage, PersistedMessageData, SubmissionKey};
