//! Shared test doubles for message unit tests.

use crate::message::{
    domain::{Message, MessagePatch},
    ports::{MessageFilter, MessageStore, MessageStoreError, MessageStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;

mock! {
    pub Store {}

    #[async_trait]
    impl MessageStore for Store {
        async fn insert(&self, message: &Message) -> MessageStoreResult<Message>;
        async fn find_many(&self, filter: &MessageFilter) -> MessageStoreResult<Vec<Message>>;
        async fn find_one_and_update(
            &self,
            filter: &MessageFilter,
            patch: &MessagePatch,
            updated_at: DateTime<Utc>,
        ) -> MessageStoreResult<Option<Message>>;
        async fn find_one_and_delete(
            &self,
            filter: &MessageFilter,
        ) -> MessageStoreResult<Option<Message>>;
    }
}

/// Builds an infrastructure failure as a store would report it.
pub fn outage() -> MessageStoreError {
    MessageStoreError::unavailable(std::io::Error::other("connection refused by 10.0.0.5:5432"))
}
