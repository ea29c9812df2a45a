//! Tests for wiring a `PostgreSQL`-backed dispatcher from configuration.

use crate::postgres_store::helpers::{runtime, test_config};
use courier::bootstrap::{BootstrapError, build_dispatcher};
use courier::config::ServiceConfig;
use courier::message::{dispatch::Status, domain::UserId};
use rstest::rstest;
use serde_json::json;
use std::io;
use std::time::Duration;
use tokio::runtime::Runtime;

/// A dispatcher built from configuration serves requests end to end.
#[rstest]
fn built_dispatcher_serves_requests(runtime: io::Result<Runtime>) {
    let Some(config) = test_config() else { return };
    let rt = runtime.expect("runtime creation");

    let dispatcher = rt
        .block_on(build_dispatcher(&config))
        .expect("dispatcher should build");
    let sender = UserId::new();
    let created = rt.block_on(dispatcher.dispatch(
        "message_create",
        &json!({ "createData": { "sender": sender, "recipient": UserId::new() } }),
    ));
    let message = created.message_payload().expect("creation should return a message");
    let deleted = rt.block_on(dispatcher.dispatch(
        "message_delete_by_id",
        &json!({ "id": message.id().to_string(), "userId": sender.to_string() }),
    ));

    assert_eq!(created.status(), Status::Created);
    assert_eq!(deleted.status(), Status::Ok);
}

/// An unreachable database surfaces as a pool error.
#[rstest]
fn unreachable_database_fails_to_build(runtime: io::Result<Runtime>) {
    let Some(_) = test_config() else { return };
    let rt = runtime.expect("runtime creation");
    let config = ServiceConfig::new("postgres://courier@127.0.0.1:1/courier")
        .with_pool_size(1)
        .with_connect_timeout(Duration::from_secs(1));

    let result = rt.block_on(build_dispatcher(&config));

    assert!(matches!(result, Err(BootstrapError::Pool(_))));
}
