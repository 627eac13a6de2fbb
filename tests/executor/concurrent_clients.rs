//! Concurrent Client Tests
//!
//! Many sessions hitting one table from separate threads.

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;
use tally::{Error, RetryConfig, Tally, TallyConfig};

#[test]
fn concurrent_inserts_get_unique_ids() {
    let tally = create_tally();
    let threads = 8;
    let per_thread = 25;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let session = tally.session().unwrap();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..per_thread)
                    .map(|i| {
                        match session
                            .invoke("add_player", serde_json::json!({ "name": format!("{}-{}", t, i) }))
                            .unwrap()
                        {
                            tally::Output::PlayerId(id) => id,
                            other => panic!("unexpected {:?}", other),
                        }
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), threads * per_thread);
    assert_eq!(tally.players().unwrap().len(), threads * per_thread);
}

#[test]
fn concurrent_point_updates_are_not_lost() {
    let tally = create_tally();
    let id = tally.add_player("Contested").unwrap();
    let threads = 6;
    let per_thread = 40;

    thread::scope(|s| {
        for _ in 0..threads {
            s.spawn(|| {
                for _ in 0..per_thread {
                    tally.add_points(id, 1).unwrap();
                }
            });
        }
    });

    assert_eq!(
        tally.player(id).unwrap().unwrap().score,
        (threads * per_thread) as i64
    );
}

#[test]
fn remove_during_updates_ends_consistently() {
    let tally = create_tally();
    let id = tally.add_player("Doomed").unwrap();

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..50 {
                let _ = tally.add_points(id, 1);
            }
        });
        s.spawn(|| tally.remove_player(id).unwrap());
    });

    assert!(tally.player(id).unwrap().is_none());
    assert!(tally.add_points(id, 1).is_err());
}

#[test]
fn sessions_contending_on_one_player_all_succeed_without_retries() {
    init_logging();
    let config = TallyConfig {
        retry: RetryConfig::no_retry(),
    };
    let tally = Tally::open_with_config(config).unwrap();
    let id = tally.add_player("Busy").unwrap();
    let threads = 8;
    let per_thread = 50;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let session = tally.session().unwrap();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..per_thread)
                    .filter_map(|_| {
                        session
                            .invoke(
                                "add_points",
                                serde_json::json!({"player_id": id.as_u64(), "amount": 1}),
                            )
                            .err()
                    })
                    .collect::<Vec<Error>>()
            })
        })
        .collect();

    let errors: Vec<Error> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    assert_eq!(
        tally.player(id).unwrap().unwrap().score,
        (threads * per_thread) as i64
    );
}
