//! Then steps for message lifecycle BDD scenarios.

use super::world::{MessageWorld, run_async};
use rstest_bdd_macros::then;
use serde_json::json;

#[then("the response status is {code:u16}")]
fn response_status_is(world: &MessageWorld, code: u16) -> Result<(), eyre::Report> {
    let status = world.last_response()?.status();
    if status.code() != code {
        return Err(eyre::eyre!("expected status {code}, found {status}"));
    }
    Ok(())
}

#[then(r#"the response message is "{key}""#)]
fn response_message_is(world: &MessageWorld, key: String) -> Result<(), eyre::Report> {
    let message = world.last_response()?.message();
    if message.as_str() != key {
        return Err(eyre::eyre!("expected message {key}, found {message}"));
    }
    Ok(())
}

#[then("the chat listing holds {count:usize} message")]
fn chat_listing_holds(world: &MessageWorld, count: usize) -> Result<(), eyre::Report> {
    let listed = world
        .last_response()?
        .messages_payload()
        .ok_or_else(|| eyre::eyre!("response carries no message list"))?;
    if listed.len() != count {
        return Err(eyre::eyre!("expected {count} messages, found {}", listed.len()));
    }
    Ok(())
}

#[then(r#"the last message reads "{content}""#)]
fn last_message_reads(world: &MessageWorld, content: String) -> Result<(), eyre::Report> {
    let last = world.last_message()?;
    let chat_id = last
        .chat_id()
        .ok_or_else(|| eyre::eyre!("last message has no chat"))?;
    let listing = run_async(world.dispatcher.dispatch(
        "messages_get_by_chat_id",
        &json!({ "id": chat_id.to_string() }),
    ));
    let stored = listing
        .messages_payload()
        .and_then(|messages| messages.iter().find(|message| message.id() == last.id()))
        .ok_or_else(|| eyre::eyre!("last message is no longer stored"))?;
    if stored.content() != Some(content.as_str()) {
        return Err(eyre::eyre!(
            "expected content {content:?}, found {:?}",
            stored.content()
        ));
    }
    Ok(())
}
