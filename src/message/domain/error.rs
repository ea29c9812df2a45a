//! Error types for message domain parsing.

use thiserror::Error;

/// Errors returned while constructing message domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// The value is not a valid UUID for the given identifier kind.
    #[error("invalid {kind} identifier '{value}', expected a UUID")]
    InvalidIdentifier {
        /// Identifier kind (`message`, `user`, or `chat`).
        kind: &'static str,
        /// Raw value supplied by the caller.
        value: String,
    },
}
