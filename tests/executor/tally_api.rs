//! Tally API Tests
//!
//! Tests for the high-level typed wrapper.

use crate::common::*;
use tally::{Error, PlayerId};

// ============================================================================
// Reducers
// ============================================================================

#[test]
fn ids_start_at_one_and_increase() {
    let tally = create_tally();

    let a = tally.add_player("Alice").unwrap();
    let b = tally.add_player("Bob").unwrap();
    let c = tally.add_player("Carol").unwrap();

    assert_eq!(a, PlayerId::new(1));
    assert_eq!(b, PlayerId::new(2));
    assert_eq!(c, PlayerId::new(3));
}

#[test]
fn add_player_trims_name() {
    let tally = create_tally();

    let id = tally.add_player("  Alice ").unwrap();

    let player = tally.player(id).unwrap().unwrap();
    assert_eq!(player.name, "Alice");
    assert_eq!(player.score, 0);
}

#[test]
fn duplicate_names_are_distinct_players() {
    let tally = create_tally();

    let first = tally.add_player("Sam").unwrap();
    let second = tally.add_player("Sam").unwrap();

    assert_ne!(first, second);
    assert_eq!(tally.players().unwrap().len(), 2);
}

#[test]
fn points_accumulate() {
    let tally = create_tally();
    let bob = tally.add_player("Bob").unwrap();

    tally.add_points(bob, 50).unwrap();
    tally.subtract_points(bob, 20).unwrap();

    assert_eq!(tally.player(bob).unwrap().unwrap().score, 30);
}

#[test]
fn removed_player_is_gone_and_id_not_reused() {
    let tally = create_tally();
    let alice = tally.add_player("Alice").unwrap();

    tally.remove_player(alice).unwrap();

    assert!(tally.player(alice).unwrap().is_none());
    assert_eq!(
        tally.add_points(alice, 1).unwrap_err(),
        Error::NotFound {
            message: "Player not found".into()
        }
    );
    assert_eq!(tally.add_player("Bob").unwrap(), PlayerId::new(2));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn validation_failures_leave_table_unchanged() {
    let tally = create_tally();
    let bob = tally.add_player("Bob").unwrap();
    tally.add_points(bob, 30).unwrap();
    let before = tally.players().unwrap();
    let version = tally.database().current_version();

    for result in [
        tally.add_player(""),
        tally.add_player("\t \n"),
    ] {
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }
    for amount in [0, -1, i64::MIN] {
        assert!(matches!(
            tally.add_points(bob, amount),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            tally.subtract_points(bob, amount),
            Err(Error::InvalidArgument { .. })
        ));
    }
    assert!(matches!(
        tally.remove_player(PlayerId::new(999)),
        Err(Error::NotFound { .. })
    ));

    assert_eq!(tally.players().unwrap(), before);
    assert_eq!(tally.database().current_version(), version);
}

#[test]
fn missing_player_checked_before_amount() {
    let tally = create_tally();

    assert!(matches!(
        tally.add_points(PlayerId::new(5), 0),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn subtract_below_min_is_out_of_range() {
    let tally = create_tally();
    let id = tally.add_player("Low").unwrap();
    tally.subtract_points(id, i64::MAX).unwrap();
    tally.subtract_points(id, 1).unwrap();

    assert_eq!(
        tally.subtract_points(id, 1).unwrap_err(),
        Error::InvalidArgument {
            message: "Score out of range".into()
        }
    );
    assert_eq!(tally.player(id).unwrap().unwrap().score, i64::MIN);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn leaderboard_orders_by_score_then_id() {
    let tally = create_tally();
    let a = tally.add_player("A").unwrap();
    let b = tally.add_player("B").unwrap();
    let c = tally.add_player("C").unwrap();
    tally.add_points(a, 10).unwrap();
    tally.add_points(b, 20).unwrap();
    tally.add_points(c, 10).unwrap();

    let order: Vec<_> = tally
        .leaderboard(10)
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(order, vec![b, a, c]);
}

#[test]
fn leaderboard_respects_limit() {
    let tally = create_tally();
    for name in ["A", "B", "C"] {
        tally.add_player(name).unwrap();
    }

    assert_eq!(tally.leaderboard(2).unwrap().len(), 2);
    assert!(tally.leaderboard(0).unwrap().is_empty());
}

#[test]
fn players_listed_in_id_order() {
    let tally = create_tally();
    for name in ["Zed", "Amy", "Kim"] {
        tally.add_player(name).unwrap();
    }

    let ids: Vec<u64> = tally
        .players()
        .unwrap()
        .iter()
        .map(|p| p.id.as_u64())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn ping_returns_version() {
    let tally = create_tally();

    assert!(!tally.ping().unwrap().is_empty());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn open_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(tally::CONFIG_FILE_NAME);
    std::fs::write(&path, "[retry]\nmax_retries = 12\nmax_delay_ms = 5\n").unwrap();

    let tally = tally::Tally::open_with_config_file(&path).unwrap();

    let retry = tally.database().config().retry;
    assert_eq!(retry.max_retries, 12);
    assert_eq!(retry.max_delay_ms, 5);
    assert_eq!(retry.base_delay_ms, 1);
}

#[test]
fn malformed_config_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(tally::CONFIG_FILE_NAME);
    std::fs::write(&path, "retry = 3").unwrap();

    assert!(matches!(
        tally::Tally::open_with_config_file(&path),
        Err(Error::Config { .. })
    ));
}
