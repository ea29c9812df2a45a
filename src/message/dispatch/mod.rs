//! Request dispatch for the message service.
//!
//! A surrounding transport hands each inbound request to
//! [`MessageDispatcher::dispatch`] as a pattern name plus a JSON parameter
//! bag, and serializes the returned [`ResponseEnvelope`].

mod dispatcher;
mod envelope;
mod request;

pub use dispatcher::{MessageDispatcher, STORE_UNAVAILABLE_DETAIL};
pub use envelope::{Outcome, Payload, ResponseEnvelope, ResponseKey, Status};
pub use request::{
    CREATE_DATA_PARAM, ID_PARAM, MessageRequest, ParameterError, ParameterIssue, RequestPattern,
    UPDATE_DATA_PARAM, USER_ID_PARAM, UnknownPatternError,
};
