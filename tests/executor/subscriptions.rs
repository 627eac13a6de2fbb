//! Subscription Tests
//!
//! Observers registered on the database see every committed change once,
//! in version order, and nothing from failed reducers.

use crate::common::*;
use parking_lot::Mutex;
use std::sync::Arc;
use tally::{RowChange, TableUpdate};

type Recorded = Arc<Mutex<Vec<TableUpdate>>>;

fn recording_subscriber(tally: &tally::Tally) -> (Recorded, Vec<tally::PlayerRecord>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let (_, initial) = tally
        .database()
        .subscribe(move |update| sink.lock().push(update.clone()));
    (seen, initial)
}

#[test]
fn subscriber_gets_initial_rows() {
    let tally = create_tally();
    tally.add_player("Alice").unwrap();
    tally.add_player("Bob").unwrap();

    let (_, initial) = recording_subscriber(&tally);

    let names: Vec<_> = initial.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}

#[test]
fn each_reducer_produces_one_update() {
    let tally = create_tally();
    let (seen, _) = recording_subscriber(&tally);

    let id = tally.add_player("Alice").unwrap();
    tally.add_points(id, 5).unwrap();
    tally.remove_player(id).unwrap();

    let seen = seen.lock();
    assert_eq!(seen.len(), 3);
    assert!(matches!(seen[0].changes[..], [RowChange::Inserted(_)]));
    match &seen[1].changes[..] {
        [RowChange::Updated { old, new }] => {
            assert_eq!(old.score, 0);
            assert_eq!(new.score, 5);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(seen[2].changes[..], [RowChange::Deleted(_)]));
    assert!(seen.windows(2).all(|w| w[0].version < w[1].version));
}

#[test]
fn failed_reducers_are_not_broadcast() {
    let tally = create_tally();
    let (seen, _) = recording_subscriber(&tally);

    let _ = tally.add_player(" ");
    let _ = tally.remove_player(tally::PlayerId::new(3));

    assert!(seen.lock().is_empty());
}

#[test]
fn unsubscribed_observer_stops_receiving() {
    let tally = create_tally();
    let seen = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&seen);
    let (id, _) = tally.database().subscribe(move |_| *sink.lock() += 1);

    tally.add_player("Alice").unwrap();
    assert!(tally.database().unsubscribe(id));
    tally.add_player("Bob").unwrap();

    assert_eq!(*seen.lock(), 1);
    assert_eq!(tally.database().subscriber_count(), 0);
}
