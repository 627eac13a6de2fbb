//! Named Call Tests
//!
//! `Executor::invoke` as a host transport drives it: an operation name and
//! a JSON argument object.

use crate::common::*;
use serde_json::json;
use tally::{Command, Error, Output};

#[test]
fn every_operation_name_is_invocable() {
    let executor = create_executor();
    executor
        .invoke("add_player", json!({"name": "Alice"}))
        .unwrap();

    let calls = [
        ("add_player", json!({"name": "Bob"})),
        ("add_points", json!({"player_id": 1, "amount": 3})),
        ("subtract_points", json!({"player_id": 1, "amount": 1})),
        ("get_player", json!({"player_id": 1})),
        ("list_players", json!(null)),
        ("leaderboard", json!({"limit": 1})),
        ("ping", json!({})),
        ("remove_player", json!({"player_id": 2})),
    ];
    assert_eq!(calls.len(), Command::OPERATION_NAMES.len());

    for (name, args) in calls {
        assert!(
            executor.invoke(name, args).is_ok(),
            "{} should succeed",
            name
        );
    }
}

#[test]
fn unknown_operation_is_reported_by_name() {
    let executor = create_executor();

    let err = executor.invoke("drop_table", json!({})).unwrap_err();

    assert_eq!(
        err,
        Error::UnknownOperation {
            name: "drop_table".into()
        }
    );
}

#[test]
fn malformed_arguments_are_rejected_before_execution() {
    let executor = create_executor();

    let err = executor
        .invoke("add_points", json!({"player_id": 1, "amount": "lots"}))
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArguments { .. }));
    assert_eq!(executor.database().current_version(), 0);
}

#[test]
fn reducer_errors_pass_through_invoke() {
    let executor = create_executor();

    assert_eq!(
        executor.invoke("add_player", json!({"name": ""})),
        Err(Error::InvalidArgument {
            message: "Name cannot be empty".into()
        })
    );
    assert_eq!(
        executor.invoke("subtract_points", json!({"player_id": 4, "amount": 1})),
        Err(Error::NotFound {
            message: "Player not found".into()
        })
    );
}

#[test]
fn invoke_and_execute_agree() {
    let by_name = create_executor();
    let by_command = create_executor();

    let a = by_name.invoke("add_player", json!({"name": "Alice"}));
    let b = by_command.execute(Command::AddPlayer {
        name: "Alice".into(),
    });
    assert_eq!(a, b);

    let a = by_name.invoke("list_players", json!(null)).map(extract_players);
    let b = by_command.execute(Command::ListPlayers).map(extract_players);
    assert_eq!(a, b);
}

#[test]
fn commands_round_trip_through_json() {
    let executor = create_executor();
    let wire = r#"{"add_player":{"name":"Wire"}}"#;

    let cmd: Command = serde_json::from_str(wire).unwrap();
    let output = executor.execute(cmd).unwrap();

    assert_eq!(output, Output::PlayerId(1));
    assert_eq!(serde_json::to_string(&output).unwrap(), r#"{"PlayerId":1}"#);
}
