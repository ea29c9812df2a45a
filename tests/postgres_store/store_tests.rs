//! Insert, read, and find-and-modify tests for [`PostgresMessageStore`].

use crate::postgres_store::helpers::{message_in, runtime, store};
use courier::message::{
    adapters::postgres::PostgresMessageStore,
    domain::{ChatId, Message, MessagePatch, NewMessage, UserId},
    ports::{MessageFilter, MessageStore},
};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Stored records come back from a chat listing in creation order.
#[rstest]
fn insert_then_list_by_chat(runtime: io::Result<Runtime>, store: Option<PostgresMessageStore>) {
    let Some(pg) = store else { return };
    let rt = runtime.expect("runtime creation");
    let chat_id = ChatId::new();
    let sender = UserId::new();

    let first = rt
        .block_on(pg.insert(&message_in(chat_id, sender, "one")))
        .expect("insert");
    let second = rt
        .block_on(pg.insert(&message_in(chat_id, sender, "two")))
        .expect("insert");
    rt.block_on(pg.insert(&message_in(ChatId::new(), sender, "elsewhere")))
        .expect("insert");

    let listed = rt
        .block_on(pg.find_many(&MessageFilter::chat(chat_id)))
        .expect("listing");
    assert_eq!(listed, vec![first, second]);
}

/// Messages without a chat survive a round trip with null columns.
#[rstest]
fn null_columns_round_trip(runtime: io::Result<Runtime>, store: Option<PostgresMessageStore>) {
    let Some(pg) = store else { return };
    let rt = runtime.expect("runtime creation");
    let sender = UserId::new();
    let message = Message::create(NewMessage::new(sender, UserId::new()), &DefaultClock);

    let stored = rt.block_on(pg.insert(&message)).expect("insert");

    assert_eq!(stored.id(), message.id());
    assert!(stored.chat_id().is_none());
    assert!(stored.content().is_none());
}

/// Updates apply only when both the identifier and sender match.
#[rstest]
fn update_requires_owner(runtime: io::Result<Runtime>, store: Option<PostgresMessageStore>) {
    let Some(pg) = store else { return };
    let rt = runtime.expect("runtime creation");
    let sender = UserId::new();
    let stored = rt
        .block_on(pg.insert(&message_in(ChatId::new(), sender, "draft")))
        .expect("insert");
    let patch = MessagePatch::new().with_content("final");
    let stamp = stored.created_at() + Duration::seconds(1);

    let foreign = rt
        .block_on(pg.find_one_and_update(
            &MessageFilter::owned(stored.id(), UserId::new()),
            &patch,
            stamp,
        ))
        .expect("foreign update should not error");
    let owned = rt
        .block_on(pg.find_one_and_update(&MessageFilter::owned(stored.id(), sender), &patch, stamp))
        .expect("owned update")
        .expect("owned update should match");

    assert!(foreign.is_none());
    assert_eq!(owned.content(), Some("final"));
    assert_eq!(owned.chat_id(), stored.chat_id());
    assert_eq!(owned.updated_at(), stamp);
    assert_eq!(owned.created_at(), stored.created_at());
}

/// A patch can move a message to another chat.
#[rstest]
fn update_moves_between_chats(runtime: io::Result<Runtime>, store: Option<PostgresMessageStore>) {
    let Some(pg) = store else { return };
    let rt = runtime.expect("runtime creation");
    let sender = UserId::new();
    let target = ChatId::new();
    let stored = rt
        .block_on(pg.insert(&message_in(ChatId::new(), sender, "moving")))
        .expect("insert");

    rt.block_on(pg.find_one_and_update(
        &MessageFilter::owned(stored.id(), sender),
        &MessagePatch::new().with_chat_id(target),
        Utc::now(),
    ))
    .expect("update")
    .expect("update should match");

    let listed = rt
        .block_on(pg.find_many(&MessageFilter::chat(target)))
        .expect("listing");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(Message::id), Some(stored.id()));
}

/// Deletion removes the owned record once and then matches nothing.
#[rstest]
fn delete_is_single_shot(runtime: io::Result<Runtime>, store: Option<PostgresMessageStore>) {
    let Some(pg) = store else { return };
    let rt = runtime.expect("runtime creation");
    let sender = UserId::new();
    let stored = rt
        .block_on(pg.insert(&message_in(ChatId::new(), sender, "bye")))
        .expect("insert");
    let filter = MessageFilter::owned(stored.id(), sender);

    let stranger = rt
        .block_on(pg.find_one_and_delete(&MessageFilter::owned(stored.id(), UserId::new())))
        .expect("stranger delete should not error");
    let first = rt.block_on(pg.find_one_and_delete(&filter)).expect("delete");
    let second = rt.block_on(pg.find_one_and_delete(&filter)).expect("delete");

    assert!(stranger.is_none());
    assert_eq!(first.as_ref().map(Message::id), Some(stored.id()));
    assert!(second.is_none());
}
