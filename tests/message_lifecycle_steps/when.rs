//! When steps for message lifecycle BDD scenarios.

use super::world::MessageWorld;
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#""{author}" posts "{content}" to chat "{chat}""#)]
fn posts(
    world: &mut MessageWorld,
    author: String,
    content: String,
    chat: String,
) -> Result<(), eyre::Report> {
    world.post(&author, &content, &chat)
}

#[when(r#"the messages of chat "{chat}" are requested"#)]
fn chat_requested(world: &mut MessageWorld, chat: String) {
    let chat_id = world.chat(&chat);
    world.send(
        "messages_get_by_chat_id",
        &json!({ "id": chat_id.to_string() }),
    );
}

#[when(r#""{editor}" edits the last message to "{content}""#)]
fn edits_last_message(
    world: &mut MessageWorld,
    editor: String,
    content: String,
) -> Result<(), eyre::Report> {
    let user_id = world.user(&editor)?;
    let id = world.last_message()?.id();
    world.send(
        "message_update",
        &json!({
            "id": id.to_string(),
            "userId": user_id.to_string(),
            "updateData": { "content": content },
        }),
    );
    Ok(())
}

#[when(r#""{requester}" deletes the last message"#)]
fn deletes_last_message(world: &mut MessageWorld, requester: String) -> Result<(), eyre::Report> {
    let user_id = world.user(&requester)?;
    let id = world.last_message()?.id();
    world.send(
        "message_delete_by_id",
        &json!({ "id": id.to_string(), "userId": user_id.to_string() }),
    );
    Ok(())
}

#[when(r#"the "{pattern}" request is sent without parameters"#)]
fn sent_without_parameters(world: &mut MessageWorld, pattern: String) {
    world.send(&pattern, &json!({}));
}
