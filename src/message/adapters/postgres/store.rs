//! `PostgreSQL` store implementation for message records.

use super::{
    models::{MessageRow, NewMessageRow},
    schema::messages,
};
use crate::message::{
    domain::{ChatId, Message, MessageId, MessagePatch, PersistedMessageData, UserId},
    ports::{MessageFilter, MessageStore, MessageStoreError, MessageStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Nullable, Text, Timestamptz, Uuid as SqlUuid};

/// `PostgreSQL` connection pool type used by the message store.
pub type MessagePgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema applied by [`PostgresMessageStore::apply_schema`].
pub const CREATE_MESSAGES_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_messages/up.sql");

const FIND_MANY_SQL: &str = concat!(
    "SELECT id, sender, recipient, chat_id, content, created_at, updated_at ",
    "FROM messages ",
    "WHERE ($1::uuid IS NULL OR id = $1) ",
    "AND ($2::uuid IS NULL OR sender = $2) ",
    "AND ($3::uuid IS NULL OR chat_id = $3) ",
    "ORDER BY created_at, id",
);

// The sub-select locks the first matching row so the filter and the write
// form one statement.
const FIND_ONE_AND_UPDATE_SQL: &str = concat!(
    "UPDATE messages SET ",
    "content = COALESCE($4, content), ",
    "chat_id = COALESCE($5, chat_id), ",
    "updated_at = $6 ",
    "WHERE id = (",
    "SELECT id FROM messages ",
    "WHERE ($1::uuid IS NULL OR id = $1) ",
    "AND ($2::uuid IS NULL OR sender = $2) ",
    "AND ($3::uuid IS NULL OR chat_id = $3) ",
    "ORDER BY created_at, id LIMIT 1 FOR UPDATE",
    ") ",
    "RETURNING id, sender, recipient, chat_id, content, created_at, updated_at",
);

const FIND_ONE_AND_DELETE_SQL: &str = concat!(
    "DELETE FROM messages ",
    "WHERE id = (",
    "SELECT id FROM messages ",
    "WHERE ($1::uuid IS NULL OR id = $1) ",
    "AND ($2::uuid IS NULL OR sender = $2) ",
    "AND ($3::uuid IS NULL OR chat_id = $3) ",
    "ORDER BY created_at, id LIMIT 1 FOR UPDATE",
    ") ",
    "RETURNING id, sender, recipient, chat_id, content, created_at, updated_at",
);

/// `PostgreSQL`-backed message store.
///
/// All database work is offloaded to the blocking thread pool via
/// [`tokio::task::spawn_blocking`].
///
/// # Example
///
/// ```ignore
/// use diesel::r2d2::{ConnectionManager, Pool};
/// use diesel::PgConnection;
/// use courier::message::adapters::postgres::PostgresMessageStore;
///
/// let manager = ConnectionManager::<PgConnection>::new("postgres://...");
/// let pool = Pool::builder().build(manager)?;
/// let store = PostgresMessageStore::new(pool);
/// ```
#[derive(Debug, Clone)]
pub struct PostgresMessageStore {
    pool: MessagePgPool,
}

impl PostgresMessageStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MessagePgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &MessagePgPool {
        &self.pool
    }

    /// Creates the `messages` table and its indexes when absent.
    ///
    /// # Errors
    ///
    /// Returns [`MessageStoreError::Unavailable`] when a connection cannot be
    /// obtained or the DDL fails.
    pub async fn apply_schema(&self) -> MessageStoreResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_MESSAGES_SQL)
                .map_err(MessageStoreError::unavailable)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> MessageStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MessageStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MessageStoreError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(MessageStoreError::unavailable)?
    }
}

#[async_trait]
impl MessageStore for PostgresMessageStore {
    async fn insert(&self, message: &Message) -> MessageStoreResult<Message> {
        let new_row = to_new_row(message);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(messages::table)
                .values(&new_row)
                .returning(MessageRow::as_returning())
                .get_result::<MessageRow>(connection)
                .map_err(map_write_error)?;
            Ok(row_to_message(row))
        })
        .await
    }

    async fn find_many(&self, filter: &MessageFilter) -> MessageStoreResult<Vec<Message>> {
        let lookup = *filter;
        self.run_blocking(move |connection| {
            let rows = diesel::sql_query(FIND_MANY_SQL)
                .bind::<Nullable<SqlUuid>, _>(lookup.id().map(MessageId::into_inner))
                .bind::<Nullable<SqlUuid>, _>(lookup.sender().map(UserId::into_inner))
                .bind::<Nullable<SqlUuid>, _>(lookup.chat_id().map(ChatId::into_inner))
                .load::<MessageRow>(connection)
                .map_err(MessageStoreError::unavailable)?;
            Ok(rows.into_iter().map(row_to_message).collect())
        })
        .await
    }

    async fn find_one_and_update(
        &self,
        filter: &MessageFilter,
        patch: &MessagePatch,
        updated_at: DateTime<Utc>,
    ) -> MessageStoreResult<Option<Message>> {
        let lookup = *filter;
        let content = patch.content().map(str::to_owned);
        let chat_id = patch.chat_id().map(ChatId::into_inner);

        self.run_blocking(move |connection| {
            let row = diesel::sql_query(FIND_ONE_AND_UPDATE_SQL)
                .bind::<Nullable<SqlUuid>, _>(lookup.id().map(MessageId::into_inner))
                .bind::<Nullable<SqlUuid>, _>(lookup.sender().map(UserId::into_inner))
                .bind::<Nullable<SqlUuid>, _>(lookup.chat_id().map(ChatId::into_inner))
                .bind::<Nullable<Text>, _>(content)
                .bind::<Nullable<SqlUuid>, _>(chat_id)
                .bind::<Timestamptz, _>(updated_at)
                .get_result::<MessageRow>(connection)
                .optional()
                .map_err(map_write_error)?;
            Ok(row.map(row_to_message))
        })
        .await
    }

    async fn find_one_and_delete(
        &self,
        filter: &MessageFilter,
    ) -> MessageStoreResult<Option<Message>> {
        let lookup = *filter;
        self.run_blocking(move |connection| {
            let row = diesel::sql_query(FIND_ONE_AND_DELETE_SQL)
                .bind::<Nullable<SqlUuid>, _>(lookup.id().map(MessageId::into_inner))
                .bind::<Nullable<SqlUuid>, _>(lookup.sender().map(UserId::into_inner))
                .bind::<Nullable<SqlUuid>, _>(lookup.chat_id().map(ChatId::into_inner))
                .get_result::<MessageRow>(connection)
                .optional()
                .map_err(MessageStoreError::unavailable)?;
            Ok(row.map(row_to_message))
        })
        .await
    }
}

fn to_new_row(message: &Message) -> NewMessageRow {
    NewMessageRow {
        id: message.id().into_inner(),
        sender: message.sender().into_inner(),
        recipient: message.recipient().into_inner(),
        chat_id: message.chat_id().map(ChatId::into_inner),
        content: message.content().map(str::to_owned),
        created_at: message.created_at(),
        updated_at: message.updated_at(),
    }
}

pub(crate) fn row_to_message(row: MessageRow) -> Message {
    Message::from_persisted(PersistedMessageData {
        id: MessageId::from_uuid(row.id),
        sender: UserId::from_uuid(row.sender),
        recipient: UserId::from_uuid(row.recipient),
        chat_id: row.chat_id.map(ChatId::from_uuid),
        content: row.content,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Classifies write failures, surfacing unique violations by constraint.
pub(crate) fn map_write_error(err: DieselError) -> MessageStoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) => {
            MessageStoreError::duplicate_key(info.constraint_name().unwrap_or("unknown"))
        }
        _ => MessageStoreError::unavailable(err),
    }
}
