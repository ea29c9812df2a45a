//! Given steps for message lifecycle BDD scenarios.

use super::world::MessageWorld;
use courier::message::dispatch::Status;
use courier::message::domain::UserId;
use rstest_bdd_macros::given;

#[given(r#"a user "{name}""#)]
fn a_user(world: &mut MessageWorld, name: String) {
    world.users.insert(name, UserId::new());
}

#[given(r#""{author}" has posted "{content}" to chat "{chat}""#)]
fn has_posted(
    world: &mut MessageWorld,
    author: String,
    content: String,
    chat: String,
) -> Result<(), eyre::Report> {
    world.post(&author, &content, &chat)?;
    let status = world.last_response()?.status();
    if status != Status::Created {
        return Err(eyre::eyre!("setup post failed with status {status}"));
    }
    Ok(())
}
