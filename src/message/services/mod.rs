//! Application services for the message lifecycle.

mod lifecycle;

pub use lifecycle::{MessageService, MessageServiceError, MessageServiceResult};
