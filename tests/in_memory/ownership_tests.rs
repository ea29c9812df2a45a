//! Ownership enforcement for update and delete requests.

use crate::in_memory::helpers::{
    MemoryDispatcher, create_message, dispatcher, list_chat, owned_params, runtime,
};
use courier::message::{
    dispatch::Status,
    domain::{ChatId, MessageId, UserId},
};
use rstest::rstest;
use serde_json::json;
use std::io;
use tokio::runtime::Runtime;

/// The recipient of a message may not edit it.
#[rstest]
fn recipient_cannot_update(runtime: io::Result<Runtime>, dispatcher: MemoryDispatcher) {
    let rt = runtime.expect("runtime creation");
    let chat_id = ChatId::new();
    let created =
        create_message(&rt, &dispatcher, UserId::new(), chat_id, "original").expect("create");

    let mut params = owned_params(&created, created.recipient());
    params["updateData"] = json!({ "content": "tampered" });
    let envelope = rt.block_on(dispatcher.dispatch("message_update", &params));

    assert_eq!(envelope.status(), Status::PreconditionFailed);
    assert_eq!(list_chat(&rt, &dispatcher, chat_id).expect("list"), vec![created]);
}

/// A stranger may not delete a message.
#[rstest]
fn stranger_cannot_delete(runtime: io::Result<Runtime>, dispatcher: MemoryDispatcher) {
    let rt = runtime.expect("runtime creation");
    let chat_id = ChatId::new();
    let created =
        create_message(&rt, &dispatcher, UserId::new(), chat_id, "keep me").expect("create");

    let envelope = rt.block_on(
        dispatcher.dispatch("message_delete_by_id", &owned_params(&created, UserId::new())),
    );

    assert_eq!(envelope.status(), Status::PreconditionFailed);
    assert_eq!(envelope.message().as_str(), "message_delete_by_id_precondition_failed");
    assert_eq!(list_chat(&rt, &dispatcher, chat_id).expect("list").len(), 1);
}

/// Missing and foreign messages produce identical responses.
#[rstest]
fn missing_and_foreign_messages_look_alike(
    runtime: io::Result<Runtime>,
    dispatcher: MemoryDispatcher,
) {
    let rt = runtime.expect("runtime creation");
    let requester = UserId::new();
    let foreign =
        create_message(&rt, &dispatcher, UserId::new(), ChatId::new(), "theirs").expect("create");
    let missing = MessageId::new();

    let foreign_response = rt.block_on(
        dispatcher.dispatch("message_delete_by_id", &owned_params(&foreign, requester)),
    );
    let missing_response = rt.block_on(dispatcher.dispatch(
        "message_delete_by_id",
        &json!({ "id": missing.to_string(), "userId": requester.to_string() }),
    ));

    assert_eq!(foreign_response.status(), missing_response.status());
    assert_eq!(foreign_response.message(), missing_response.message());
}

/// Any caller may read any chat.
#[rstest]
fn reading_a_chat_needs_no_identity(runtime: io::Result<Runtime>, dispatcher: MemoryDispatcher) {
    let rt = runtime.expect("runtime creation");
    let chat_id = ChatId::new();
    create_message(&rt, &dispatcher, UserId::new(), chat_id, "public").expect("create");

    let listed = list_chat(&rt, &dispatcher, chat_id).expect("list");

    assert_eq!(listed.len(), 1);
}
