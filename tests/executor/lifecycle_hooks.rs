//! Lifecycle Hook Tests
//!
//! Presence tracking built on the init/connect/disconnect hooks, the way a
//! module author would use them.

use crate::common::*;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;
use tally::{ConnectionId, HookContext, LifecycleHooks, Tally, TallyError};

#[derive(Default)]
struct Presence {
    initialized: Mutex<u32>,
    online: Mutex<BTreeSet<String>>,
}

struct PresenceHooks(Arc<Presence>);

impl LifecycleHooks for PresenceHooks {
    fn init(&self, _ctx: &HookContext) -> Result<(), TallyError> {
        *self.0.initialized.lock() += 1;
        Ok(())
    }

    fn client_connected(&self, ctx: &HookContext) -> Result<(), TallyError> {
        if let Some(id) = ctx.connection {
            self.0.online.lock().insert(id.to_string());
        }
        Ok(())
    }

    fn client_disconnected(&self, ctx: &HookContext) -> Result<(), TallyError> {
        if let Some(id) = ctx.connection {
            self.0.online.lock().remove(&id.to_string());
        }
        Ok(())
    }
}

fn open_with_presence() -> (Tally, Arc<Presence>) {
    init_logging();
    let presence = Arc::new(Presence::default());
    let tally = Tally::open_with_hooks(PresenceHooks(Arc::clone(&presence))).unwrap();
    (tally, presence)
}

#[test]
fn init_runs_at_open() {
    let (_tally, presence) = open_with_presence();

    assert_eq!(*presence.initialized.lock(), 1);
}

#[test]
fn sessions_track_presence() {
    let (tally, presence) = open_with_presence();

    let a = tally.session().unwrap();
    let b = tally.session().unwrap();
    assert_eq!(presence.online.lock().len(), 2);

    let a_id: ConnectionId = a.connection_id();
    a.close();
    let online = presence.online.lock().clone();
    assert!(!online.contains(&a_id.to_string()));
    assert!(online.contains(&b.connection_id().to_string()));

    drop(b);
    assert!(presence.online.lock().is_empty());
    assert_eq!(tally.database().connection_count(), 0);
}

#[test]
fn disconnect_of_unknown_connection_is_ignored() {
    let (tally, presence) = open_with_presence();

    assert!(!tally.database().disconnect(ConnectionId::new()));
    assert!(presence.online.lock().is_empty());
}

#[test]
fn sessions_run_reducers_on_shared_table() {
    let (tally, _) = open_with_presence();
    let session = tally.session().unwrap();

    session
        .invoke("add_player", serde_json::json!({"name": "Remote"}))
        .unwrap();

    assert_eq!(tally.players().unwrap()[0].name, "Remote");
}
