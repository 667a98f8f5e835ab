use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::store::{Alert, Inspection, Stats};

/// Commands sent from the TUI thread to the data worker.
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Reload everything immediately.
    Load,
    /// Reload after a fixed delay, for the refresh control.
    Refresh { delay: Duration },
    Shutdown,
}

/// Events sent from the data worker back to the TUI thread.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Snapshot(Snapshot),
    Error { message: String },
}

/// Everything the dashboard renders, loaded in one pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub recent: Vec<Inspection>,
    pub history: Vec<Inspection>,
    pub alerts: Vec<Alert>,
    pub stats: Stats,
}

/// Bridges the synchronous TUI loop and the tokio worker. The worker owns the
/// database connection; the TUI thread only ever touches the channels.
pub struct RuntimeBridge {
    cmd_tx: mpsc::Sender<RuntimeCommand>,
    evt_rx: mpsc::Receiver<RuntimeEvent>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RuntimeBridge {
    pub fn new(db_path: String, recent_limit: usize) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("failed to start runtime: {err}"),
                    });
                    return;
                }
            };
            runtime.block_on(super::worker::run_worker(
                db_path,
                recent_limit,
                cmd_rx,
                evt_tx,
            ));
        });

        Self {
            cmd_tx,
            evt_rx,
            handle: Some(handle),
        }
    }

    pub fn send(&self, cmd: RuntimeCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// Drain all pending worker events without blocking.
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.evt_rx.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
