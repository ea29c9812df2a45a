//! Maps named requests onto the message service and shapes the envelope.
//!
//! This is the only layer aware of response statuses and message keys. The
//! service reports failure kinds; the dispatcher decides which status each
//! kind earns and how much detail the caller sees.

use super::{
    MessageRequest, Outcome, ParameterError, Payload, RequestPattern, ResponseEnvelope,
    ResponseKey, Status,
};
use crate::message::{
    ports::MessageStore,
    services::{MessageService, MessageServiceError, MessageServiceResult},
};
use mockable::Clock;
use serde_json::Value;
use tracing::{Span, error, field, instrument, warn};

/// Error detail shown to callers when storage fails.
pub const STORE_UNAVAILABLE_DETAIL: &str = "message store unavailable";

/// Request dispatcher for the message service.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use courier::message::{
///     adapters::memory::InMemoryMessageStore,
///     dispatch::{MessageDispatcher, Status},
///     services::MessageService,
/// };
/// use mockable::DefaultClock;
/// use serde_json::json;
///
/// # tokio_test_block_on(async {
/// let service = MessageService::new(Arc::new(InMemoryMessageStore::new()), Arc::new(DefaultClock));
/// let dispatcher = MessageDispatcher::new(service);
/// let envelope = dispatcher
///     .dispatch("messages_get_by_chat_id", &json!({ "id": "" }))
///     .await;
/// assert_eq!(envelope.status(), Status::BadRequest);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(future: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread()
/// #         .enable_all()
/// #         .build()
/// #         .expect("runtime")
/// #         .block_on(future)
/// # }
/// ```
pub struct MessageDispatcher<S, C>
where
    S: MessageStore,
    C: Clock + Send + Sync,
{
    service: MessageService<S, C>,
}

impl<S, C> Clone for MessageDispatcher<S, C>
where
    S: MessageStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<S, C> MessageDispatcher<S, C>
where
    S: MessageStore,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher over `service`.
    #[must_use]
    pub const fn new(service: MessageService<S, C>) -> Self {
        Self { service }
    }

    /// Returns the wrapped service.
    #[must_use]
    pub const fn service(&self) -> &MessageService<S, C> {
        &self.service
    }

    /// Handles the request named `pattern` with parameter bag `params`.
    ///
    /// Every path yields an envelope; unknown patterns answer
    /// [`Status::NotFound`].
    #[instrument(name = "dispatch", skip(self, params), fields(status = field::Empty))]
    pub async fn dispatch(&self, pattern: &str, params: &Value) -> ResponseEnvelope {
        let envelope = match pattern.parse::<RequestPattern>() {
            Ok(request_pattern) => self.handle(request_pattern, params).await,
            Err(err) => {
                warn!(error = %err, "no handler for request pattern");
                ResponseEnvelope::failure(
                    Status::NotFound,
                    ResponseKey::PatternNotFound,
                    [("pattern", pattern)],
                )
            }
        };
        Span::current().record("status", envelope.status().code());
        envelope
    }

    /// Handles a request whose pattern is already known.
    pub async fn handle(&self, pattern: RequestPattern, params: &Value) -> ResponseEnvelope {
        match MessageRequest::parse(pattern, params) {
            Ok(request) => self.execute(pattern, request).await,
            Err(errors) => bad_request(pattern, &errors),
        }
    }

    async fn execute(&self, pattern: RequestPattern, request: MessageRequest) -> ResponseEnvelope {
        match request {
            MessageRequest::GetByChatId { chat_id } => {
                let result = self.service.get_messages_by_chat_id(chat_id).await;
                respond(pattern, Status::Ok, result.map(|messages| Some(Payload::Messages(messages))))
            }
            MessageRequest::Create { message } => {
                let result = self.service.create_message(message).await;
                respond(pattern, Status::Created, result.map(|created| Some(Payload::Message(created))))
            }
            MessageRequest::Update { id, user_id, patch } => {
                let result = self.service.update_message(id, user_id, &patch).await;
                respond(pattern, Status::Ok, result.map(|updated| Some(Payload::Message(updated))))
            }
            MessageRequest::DeleteById { id, user_id } => {
                let result = self.service.remove_message(id, user_id).await;
                respond(pattern, Status::Ok, result.map(|()| None))
            }
        }
    }
}

fn bad_request(pattern: RequestPattern, errors: &[ParameterError]) -> ResponseEnvelope {
    warn!(%pattern, rejected = errors.len(), "request parameters rejected");
    ResponseEnvelope::failure(
        Status::BadRequest,
        pattern.key(Outcome::BadRequest),
        errors.iter().map(|err| (err.field(), err.reason())),
    )
}

fn respond(
    pattern: RequestPattern,
    success: Status,
    result: MessageServiceResult<Option<Payload>>,
) -> ResponseEnvelope {
    match result {
        Ok(payload) => ResponseEnvelope::success(success, pattern.key(Outcome::Success), payload),
        Err(
            err @ (MessageServiceError::DuplicateConflict(_)
            | MessageServiceError::NotFoundOrForbidden(_)),
        ) => ResponseEnvelope::failure(
            Status::PreconditionFailed,
            pattern.key(Outcome::PreconditionFailed),
            [("message", err.to_string())],
        ),
        Err(MessageServiceError::StoreUnavailable(err)) => {
            error!(%pattern, error = %err, "message store failure");
            ResponseEnvelope::failure(
                Status::InternalServerError,
                pattern.key(Outcome::InternalError),
                [("message", STORE_UNAVAILABLE_DETAIL)],
            )
        }
    }
}
