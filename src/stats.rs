//! The stats collector and signal reporter (C9).

use std::sync::Arc;

use parking_lot::Mutex;
use signal_hook::consts::SIGHUP;
use signal_hook::iterator::Signals;

/// The five process-wide counters, mutated only under their shared mutex.
#[derive(Debug, Default)]
struct Counters {
    connected: u64,
    serviced: u64,
    success: u64,
    unsuccess: u64,
    operations: u64,
}

/// Shared handle to the stats record. Cheap to clone; every worker and the
/// reporter thread hold one.
#[derive(Clone, Debug, Default)]
pub struct Stats(Arc<Mutex<Counters>>);

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn worker_connected(&self) {
        self.0.lock().connected += 1;
    }

    pub fn worker_released(&self) {
        let mut counters = self.0.lock();
        counters.connected = counters.connected.saturating_sub(1);
        counters.serviced += 1;
    }

    pub fn response_sent(&self, success: bool) {
        let mut counters = self.0.lock();
        if success {
            counters.success += 1;
        } else {
            counters.unsuccess += 1;
        }
    }

    pub fn stages_completed(&self, count: u64) {
        if count > 0 {
            self.0.lock().operations += count;
        }
    }

    /// Snapshots and renders the fixed five-line report.
    #[must_use]
    fn report(&self) -> String {
        let counters = self.0.lock();
        format!(
            "Connected clients: {}\n\
             Serviced clients: {}\n\
             Successfully processed HTTP requests: {}\n\
             Unsuccessful HTTP requests: {}\n\
             Operations on images completed: {}\n",
            counters.connected, counters.serviced, counters.success, counters.unsuccess, counters.operations,
        )
    }
}

/// Spawns the dedicated reporter thread that blocks on `SIGHUP` and prints
/// a stats snapshot to the diagnostic stream on every delivery.
///
/// Must be called only after `SIGPIPE` has already been disposed of
/// process-wide, so that signal disposition is fully settled before any
/// worker starts accepting connections.
///
/// # Panics
///
/// Panics if the process cannot install a `SIGHUP` handler; this is a
/// startup-time condition, not a per-connection one.
pub fn spawn_reporter(stats: Stats) {
    let mut signals = Signals::new([SIGHUP]).expect("failed to register SIGHUP handler");

    std::thread::spawn(move || {
        for signal in signals.forever() {
            if signal == SIGHUP {
                eprint!("{}", stats.report());
            }
        }
    });
}
