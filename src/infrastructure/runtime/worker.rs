use std::sync::mpsc;
use std::time::Duration;

use crate::store::InspectionStore;

use super::bridge::{RuntimeCommand, RuntimeEvent, Snapshot};

/// Data worker loop. Opens the store, pushes an initial snapshot, then
/// services commands until shutdown.
pub(super) async fn run_worker(
    db_path: String,
    recent_limit: usize,
    cmd_rx: mpsc::Receiver<RuntimeCommand>,
    evt_tx: mpsc::Sender<RuntimeEvent>,
) {
    let store = match InspectionStore::open(&db_path) {
        Ok(store) => store,
        Err(err) => {
            let _ = evt_tx.send(RuntimeEvent::Error {
                message: format!("failed to open {db_path}: {err}"),
            });
            return;
        }
    };

    send_snapshot(&store, recent_limit, &evt_tx);

    let mut poll = tokio::time::interval(Duration::from_millis(50));
    loop {
        poll.tick().await;
        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                RuntimeCommand::Load => {
                    send_snapshot(&store, recent_limit, &evt_tx);
                }
                RuntimeCommand::Refresh { delay } => {
                    // The fixed pause before a reload, matching the disabled
                    // window on the refresh control.
                    tokio::time::sleep(delay).await;
                    send_snapshot(&store, recent_limit, &evt_tx);
                }
                RuntimeCommand::Shutdown => return,
            }
        }
    }
}

fn send_snapshot(
    store: &InspectionStore,
    recent_limit: usize,
    evt_tx: &mpsc::Sender<RuntimeEvent>,
) {
    match load_snapshot(store, recent_limit) {
        Ok(snapshot) => {
            let _ = evt_tx.send(RuntimeEvent::Snapshot(snapshot));
        }
        Err(err) => {
            let _ = evt_tx.send(RuntimeEvent::Error {
                message: format!("failed to load dashboard data: {err}"),
            });
        }
    }
}

fn load_snapshot(
    store: &InspectionStore,
    recent_limit: usize,
) -> crate::store::StoreResult<Snapshot> {
    Ok(Snapshot {
        recent: store.load_recent(recent_limit)?,
        history: store.load_all()?,
        alerts: store.load_alerts()?,
        stats: store.stats()?,
    })
}
