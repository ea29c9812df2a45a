//! Response envelope returned for every dispatched request.
//!
//! The envelope carries a numeric status, a symbolic message key drawn from
//! a closed dictionary, an optional payload, and optional error detail. Raw
//! error text never becomes the primary message.

use super::RequestPattern;
use crate::message::domain::Message;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Transport-facing status of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The request succeeded.
    Ok,
    /// A message was created.
    Created,
    /// A required parameter was missing or malformed.
    BadRequest,
    /// No handler exists for the request pattern.
    NotFound,
    /// A domain policy (ownership, uniqueness) rejected the request.
    PreconditionFailed,
    /// The request failed for infrastructure reasons.
    InternalServerError,
}

impl Status {
    /// Returns the HTTP-compatible numeric code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::PreconditionFailed => 412,
            Self::InternalServerError => 500,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

/// How a request concluded, independent of which request it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The service call succeeded.
    Success,
    /// Parameter validation failed before the service was called.
    BadRequest,
    /// A domain policy failure.
    PreconditionFailed,
    /// An infrastructure failure.
    InternalError,
}

/// Symbolic message key placed in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKey {
    /// Result of a known request pattern.
    Request(RequestPattern, Outcome),
    /// The request pattern has no handler.
    PatternNotFound,
}

impl ResponseKey {
    /// Returns the wire representation of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        use Outcome::{BadRequest, InternalError, PreconditionFailed, Success};
        use RequestPattern::{MessageCreate, MessageDeleteById, MessageUpdate, MessagesGetByChatId};

        match self {
            Self::Request(MessagesGetByChatId, Success) => "messages_get_success",
            Self::Request(MessagesGetByChatId, BadRequest) => "messages_get_bad_request",
            Self::Request(MessagesGetByChatId, PreconditionFailed) => {
                "messages_get_precondition_failed"
            }
            Self::Request(MessagesGetByChatId, InternalError) => "messages_get_internal_error",
            Self::Request(MessageCreate, Success) => "message_create_success",
            Self::Request(MessageCreate, BadRequest) => "message_create_bad_request",
            Self::Request(MessageCreate, PreconditionFailed) => {
                "message_create_precondition_failed"
            }
            Self::Request(MessageCreate, InternalError) => "message_create_internal_error",
            Self::Request(MessageUpdate, Success) => "message_update_success",
            Self::Request(MessageUpdate, BadRequest) => "message_update_bad_request",
            Self::Request(MessageUpdate, PreconditionFailed) => {
                "message_update_precondition_failed"
            }
            Self::Request(MessageUpdate, InternalError) => "message_update_internal_error",
            Self::Request(MessageDeleteById, Success) => "message_delete_by_id_success",
            Self::Request(MessageDeleteById, BadRequest) => "message_delete_by_id_bad_request",
            Self::Request(MessageDeleteById, PreconditionFailed) => {
                "message_delete_by_id_precondition_failed"
            }
            Self::Request(MessageDeleteById, InternalError) => "message_delete_by_id_internal_error",
            Self::PatternNotFound => "message_pattern_not_found",
        }
    }
}

impl fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResponseKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Data returned by a successful request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// A single message record.
    Message(Message),
    /// A list of message records.
    Messages(Vec<Message>),
}

/// Uniform response for every request.
///
/// # Examples
///
/// ```
/// use courier::message::dispatch::{Outcome, RequestPattern, ResponseEnvelope, Status};
///
/// let envelope = ResponseEnvelope::failure(
///     Status::BadRequest,
///     RequestPattern::MessageCreate.key(Outcome::BadRequest),
///     [("createData", "is required")],
/// );
/// let wire = serde_json::to_value(&envelope).expect("envelope serializes");
/// assert_eq!(wire["status"], 400);
/// assert_eq!(wire["message"], "message_create_bad_request");
/// assert!(wire["payload"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    status: Status,
    message: ResponseKey,
    payload: Option<Payload>,
    errors: Option<Map<String, Value>>,
}

impl ResponseEnvelope {
    /// Creates a success envelope with an optional payload.
    #[must_use]
    pub const fn success(status: Status, message: ResponseKey, payload: Option<Payload>) -> Self {
        Self {
            status,
            message,
            payload,
            errors: None,
        }
    }

    /// Creates a failure envelope whose error detail lists `errors` as
    /// field/reason pairs.
    #[must_use]
    pub fn failure<K, V>(
        status: Status,
        message: ResponseKey,
        errors: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let detail = errors
            .into_iter()
            .map(|(field, reason)| (field.into(), Value::String(reason.into())))
            .collect();
        Self {
            status,
            message,
            payload: None,
            errors: Some(detail),
        }
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the symbolic message key.
    #[must_use]
    pub const fn message(&self) -> ResponseKey {
        self.message
    }

    /// Returns the payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Returns the single message payload, if that is what was returned.
    #[must_use]
    pub const fn message_payload(&self) -> Option<&Message> {
        match &self.payload {
            Some(Payload::Message(message)) => Some(message),
            _ => None,
        }
    }

    /// Returns the message list payload, if that is what was returned.
    #[must_use]
    pub fn messages_payload(&self) -> Option<&[Message]> {
        match &self.payload {
            Some(Payload::Messages(messages)) => Some(messages),
            _ => None,
        }
    }

    /// Returns the error detail, if any.
    #[must_use]
    pub const fn errors(&self) -> Option<&Map<String, Value>> {
        self.errors.as_ref()
    }
}
