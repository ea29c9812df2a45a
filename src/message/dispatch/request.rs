//! Inbound request names and parameter-bag parsing.

use super::{Outcome, ResponseKey};
use crate::message::domain::{
    ChatId, MessageDomainError, MessageId, MessagePatch, NewMessage, UserId,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Parameter carrying a message or chat identifier.
pub const ID_PARAM: &str = "id";
/// Parameter carrying the requester's user identifier.
pub const USER_ID_PARAM: &str = "userId";
/// Parameter carrying the create payload.
pub const CREATE_DATA_PARAM: &str = "createData";
/// Parameter carrying the update payload.
pub const UPDATE_DATA_PARAM: &str = "updateData";

/// Named requests the dispatcher handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestPattern {
    /// List every message in a chat.
    MessagesGetByChatId,
    /// Create a message.
    MessageCreate,
    /// Update a message owned by the requester.
    MessageUpdate,
    /// Delete a message owned by the requester.
    MessageDeleteById,
}

impl RequestPattern {
    /// Every supported pattern.
    pub const ALL: [Self; 4] = [
        Self::MessagesGetByChatId,
        Self::MessageCreate,
        Self::MessageUpdate,
        Self::MessageDeleteById,
    ];

    /// Returns the pattern name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MessagesGetByChatId => "messages_get_by_chat_id",
            Self::MessageCreate => "message_create",
            Self::MessageUpdate => "message_update",
            Self::MessageDeleteById => "message_delete_by_id",
        }
    }

    /// Returns the response key for `outcome` of this request.
    #[must_use]
    pub const fn key(self, outcome: Outcome) -> ResponseKey {
        ResponseKey::Request(self, outcome)
    }
}

impl fmt::Display for RequestPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a request name matches no handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown request pattern: {0}")]
pub struct UnknownPatternError(pub String);

impl FromStr for RequestPattern {
    type Err = UnknownPatternError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.as_str() == value)
            .ok_or_else(|| UnknownPatternError(value.to_owned()))
    }
}

/// Why a parameter was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterIssue {
    /// Absent, `null`, blank, or an empty object.
    Missing,
    /// Present but unusable.
    Malformed(String),
}

/// A rejected request parameter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("parameter '{field}' {}", describe(.issue))]
pub struct ParameterError {
    field: &'static str,
    issue: ParameterIssue,
}

impl ParameterError {
    /// Creates an error for a missing parameter.
    #[must_use]
    pub const fn missing(field: &'static str) -> Self {
        Self {
            field,
            issue: ParameterIssue::Missing,
        }
    }

    /// Creates an error for a malformed parameter.
    #[must_use]
    pub fn malformed(field: &'static str, detail: impl Into<String>) -> Self {
        Self {
            field,
            issue: ParameterIssue::Malformed(detail.into()),
        }
    }

    /// Returns the parameter name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the rejection cause.
    #[must_use]
    pub const fn issue(&self) -> &ParameterIssue {
        &self.issue
    }

    /// Returns a caller-facing reason.
    #[must_use]
    pub fn reason(&self) -> String {
        describe(&self.issue)
    }
}

fn describe(issue: &ParameterIssue) -> String {
    match issue {
        ParameterIssue::Missing => "is required".to_owned(),
        ParameterIssue::Malformed(detail) => format!("is malformed: {detail}"),
    }
}

/// A validated request, ready for the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageRequest {
    /// List messages in a chat.
    GetByChatId {
        /// Chat to list.
        chat_id: ChatId,
    },
    /// Create a message.
    Create {
        /// Create payload.
        message: NewMessage,
    },
    /// Update an owned message.
    Update {
        /// Target message.
        id: MessageId,
        /// Asserted sender.
        user_id: UserId,
        /// Fields to merge.
        patch: MessagePatch,
    },
    /// Delete an owned message.
    DeleteById {
        /// Target message.
        id: MessageId,
        /// Asserted sender.
        user_id: UserId,
    },
}

impl MessageRequest {
    /// Validates `params` against the requirements of `pattern`.
    ///
    /// Every offending parameter is reported, not just the first.
    ///
    /// # Errors
    ///
    /// Returns the list of missing or malformed parameters.
    pub fn parse(pattern: RequestPattern, params: &Value) -> Result<Self, Vec<ParameterError>> {
        match pattern {
            RequestPattern::MessagesGetByChatId => {
                let chat_id = required_id::<ChatId>(params, ID_PARAM).map_err(|err| vec![err])?;
                Ok(Self::GetByChatId { chat_id })
            }
            RequestPattern::MessageCreate => {
                let message = required_payload::<NewMessage>(params, CREATE_DATA_PARAM)
                    .map_err(|err| vec![err])?;
                Ok(Self::Create { message })
            }
            RequestPattern::MessageUpdate => {
                let id_param = required_id::<MessageId>(params, ID_PARAM);
                let user_param = required_id::<UserId>(params, USER_ID_PARAM);
                let patch_param = required_payload::<MessagePatch>(params, UPDATE_DATA_PARAM)
                    .and_then(|patch| {
                        if patch.is_empty() {
                            Err(ParameterError::missing(UPDATE_DATA_PARAM))
                        } else {
                            Ok(patch)
                        }
                    });
                match (id_param, user_param, patch_param) {
                    (Ok(id), Ok(user_id), Ok(patch)) => Ok(Self::Update { id, user_id, patch }),
                    (id, user, patch) => Err(collect_errors([id.err(), user.err(), patch.err()])),
                }
            }
            RequestPattern::MessageDeleteById => {
                let id_param = required_id::<MessageId>(params, ID_PARAM);
                let user_param = required_id::<UserId>(params, USER_ID_PARAM);
                match (id_param, user_param) {
                    (Ok(id), Ok(user_id)) => Ok(Self::DeleteById { id, user_id }),
                    (id, user) => Err(collect_errors([id.err(), user.err()])),
                }
            }
        }
    }
}

fn collect_errors<const N: usize>(errors: [Option<ParameterError>; N]) -> Vec<ParameterError> {
    errors.into_iter().flatten().collect()
}

/// Looks up a parameter, treating `null`, blank strings, and empty objects
/// as absent.
fn present<'a>(params: &'a Value, field: &'static str) -> Result<&'a Value, ParameterError> {
    let value = params
        .get(field)
        .ok_or_else(|| ParameterError::missing(field))?;
    let is_empty = match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    };
    if is_empty {
        return Err(ParameterError::missing(field));
    }
    Ok(value)
}

fn required_id<T>(params: &Value, field: &'static str) -> Result<T, ParameterError>
where
    T: FromStr<Err = MessageDomainError>,
{
    let value = present(params, field)?;
    let text = value
        .as_str()
        .ok_or_else(|| ParameterError::malformed(field, "expected a string identifier"))?;
    text.parse::<T>()
        .map_err(|err| ParameterError::malformed(field, err.to_string()))
}

fn required_payload<T>(params: &Value, field: &'static str) -> Result<T, ParameterError>
where
    T: DeserializeOwned,
{
    let value = present(params, field)?;
    if !value.is_object() {
        return Err(ParameterError::malformed(field, "expected an object"));
    }
    T::deserialize(value).map_err(|err| ParameterError::malformed(field, err.to_string()))
}
