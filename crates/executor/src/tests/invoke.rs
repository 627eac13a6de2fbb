//! Named-call tests: operation lookup, argument decoding, and the
//! end-to-end reducer scenarios driven through `invoke`.

use serde_json::json;

use super::create_executor;
use crate::executor::decode_call;
use crate::{Command, Error, Output};

// =============================================================================
// Decoding
// =============================================================================

#[test]
fn test_unknown_operation() {
    let executor = create_executor();
    let err = executor.invoke("reset_scores", json!({})).unwrap_err();
    assert_eq!(
        err,
        Error::UnknownOperation {
            name: "reset_scores".into()
        }
    );
}

#[test]
fn test_operation_names_are_case_sensitive() {
    assert!(matches!(
        decode_call("AddPlayer", json!({"name": "Alice"})),
        Err(Error::UnknownOperation { .. })
    ));
}

#[test]
fn test_missing_argument() {
    let executor = create_executor();
    let err = executor
        .invoke("add_points", json!({"player_id": 1}))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArguments { .. }));
}

#[test]
fn test_wrong_argument_type() {
    let executor = create_executor();
    let err = executor
        .invoke("add_points", json!({"player_id": "one", "amount": 5}))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArguments { .. }));
}

#[test]
fn test_unexpected_argument() {
    let err = decode_call("add_player", json!({"name": "Alice", "team": "red"})).unwrap_err();
    assert!(matches!(err, Error::InvalidArguments { .. }));
}

#[test]
fn test_player_id_accepts_camel_case_alias() {
    assert_eq!(
        decode_call("remove_player", json!({"playerId": 3})),
        Ok(Command::RemovePlayer { player_id: 3 })
    );
    assert_eq!(
        decode_call("subtract_points", json!({"playerId": 3, "amount": 1})),
        Ok(Command::SubtractPoints {
            player_id: 3,
            amount: 1
        })
    );

    let executor = create_executor();
    executor.invoke("add_player", json!({"name": "Bob"})).unwrap();
    assert_eq!(
        executor.invoke("add_points", json!({"playerId": 1, "amount": 9})),
        Ok(Output::Unit)
    );
    assert_eq!(score_of(&executor, 1), Some(9));
}

#[test]
fn test_unit_operations_accept_null_or_empty() {
    assert_eq!(decode_call("ping", json!(null)), Ok(Command::Ping));
    assert_eq!(decode_call("ping", json!({})), Ok(Command::Ping));
    assert_eq!(decode_call("list_players", json!(null)), Ok(Command::ListPlayers));
}

#[test]
fn test_unit_operation_rejects_arguments() {
    let err = decode_call("ping", json!({"verbose": true})).unwrap_err();
    assert!(matches!(err, Error::InvalidArguments { .. }));
}

#[test]
fn test_optional_arguments_accept_null() {
    assert_eq!(
        decode_call("leaderboard", json!(null)),
        Ok(Command::Leaderboard { limit: None })
    );
    assert_eq!(
        decode_call("leaderboard", json!({"limit": 2})),
        Ok(Command::Leaderboard { limit: Some(2) })
    );
}

#[test]
fn test_required_arguments_reject_null() {
    let err = decode_call("add_player", json!(null)).unwrap_err();
    assert!(matches!(err, Error::InvalidArguments { .. }));
}

#[test]
fn test_decoding_failure_touches_nothing() {
    let executor = create_executor();
    let before = executor.database().current_version();
    let _ = executor.invoke("add_player", json!({"name": 42}));
    assert_eq!(executor.database().current_version(), before);
    assert_eq!(
        executor.invoke("list_players", json!(null)),
        Ok(Output::Players(vec![]))
    );
}

// =============================================================================
// Scenarios
// =============================================================================

fn score_of(executor: &crate::Executor, id: u64) -> Option<i64> {
    match executor.invoke("get_player", json!({ "player_id": id })) {
        Ok(Output::Player(p)) => p.map(|p| p.score),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_scenario_sequence() {
    let executor = create_executor();

    assert_eq!(
        executor.invoke("add_player", json!({"name": "  Alice "})),
        Ok(Output::PlayerId(1))
    );
    match executor.invoke("get_player", json!({"player_id": 1})) {
        Ok(Output::Player(Some(p))) => {
            assert_eq!(p.name, "Alice");
            assert_eq!(p.score, 0);
        }
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(
        executor.invoke("add_player", json!({"name": "Bob"})),
        Ok(Output::PlayerId(2))
    );
    assert_eq!(
        executor.invoke("add_points", json!({"player_id": 2, "amount": 50})),
        Ok(Output::Unit)
    );
    assert_eq!(
        executor.invoke("subtract_points", json!({"player_id": 2, "amount": 20})),
        Ok(Output::Unit)
    );
    assert_eq!(score_of(&executor, 2), Some(30));

    assert_eq!(
        executor.invoke("add_player", json!({"name": "   "})),
        Err(Error::InvalidArgument {
            message: "Name cannot be empty".into()
        })
    );
    assert_eq!(
        executor.invoke("add_points", json!({"player_id": 2, "amount": 0})),
        Err(Error::InvalidArgument {
            message: "Amount must be positive".into()
        })
    );
    assert_eq!(score_of(&executor, 2), Some(30));

    assert_eq!(
        executor.invoke("remove_player", json!({"player_id": 999})),
        Err(Error::NotFound {
            message: "Player not found".into()
        })
    );
    assert_eq!(
        executor.invoke("remove_player", json!({"player_id": 1})),
        Ok(Output::Unit)
    );
    assert_eq!(score_of(&executor, 1), None);

    // Removed ids are never handed out again
    assert_eq!(
        executor.invoke("add_player", json!({"name": "Carol"})),
        Ok(Output::PlayerId(3))
    );
}

#[test]
fn test_scores_may_go_negative() {
    let executor = create_executor();
    executor.invoke("add_player", json!({"name": "Dana"})).unwrap();
    executor
        .invoke("subtract_points", json!({"player_id": 1, "amount": 5}))
        .unwrap();
    assert_eq!(score_of(&executor, 1), Some(-5));
}

#[test]
fn test_overflow_is_invalid_argument() {
    let executor = create_executor();
    executor.invoke("add_player", json!({"name": "Max"})).unwrap();
    executor
        .invoke("add_points", json!({"player_id": 1, "amount": i64::MAX}))
        .unwrap();
    assert_eq!(
        executor.invoke("add_points", json!({"player_id": 1, "amount": 1})),
        Err(Error::InvalidArgument {
            message: "Score out of range".into()
        })
    );
    assert_eq!(score_of(&executor, 1), Some(i64::MAX));
}

#[test]
fn test_leaderboard_default_limit() {
    let executor = create_executor();
    for i in 0..12 {
        executor
            .invoke("add_player", json!({ "name": format!("p{}", i) }))
            .unwrap();
    }
    match executor.invoke("leaderboard", json!(null)) {
        Ok(Output::Players(players)) => {
            assert_eq!(players.len(), crate::DEFAULT_LEADERBOARD_LIMIT as usize)
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_ping_reports_version() {
    let executor = create_executor();
    assert_eq!(
        executor.invoke("ping", json!(null)),
        Ok(Output::Pong {
            version: env!("CARGO_PKG_VERSION").to_string()
        })
    );
}
