//! The dispatcher (C8): the accept loop, admission control, and worker
//! spawning.

use std::net::TcpListener;
use std::process;
use std::sync::{Arc, Condvar, Mutex};

use crate::consts::EXIT_SERVER_ACCEPT_ERROR;
use crate::stats::Stats;
use crate::worker;

/// A hand-rolled counting semaphore gating how many connections may be
/// in flight at once.
///
/// This is the one piece of concurrency machinery in the whole system
/// that is not borrowed from a crate: the admission rule is the core
/// contract of the dispatcher, not ambient plumbing, so it is built from
/// `Mutex` + `Condvar` directly rather than pulled in from, say,
/// `tokio::sync::Semaphore`.
struct AdmissionGate {
    available: Mutex<u32>,
    freed: Condvar,
}

impl AdmissionGate {
    fn new(capacity: u32) -> Self {
        Self { available: Mutex::new(capacity), freed: Condvar::new() }
    }

    /// Blocks until a token is available, then takes it.
    fn acquire(&self) {
        let mut available = self.available.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        while *available == 0 {
            available = self.freed.wait(available).unwrap_or_else(std::sync::PoisonError::into_inner);
        }
        *available -= 1;
    }

    /// Returns one token to the pool and wakes one waiter.
    fn release(&self) {
        let mut available = self.available.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *available += 1;
        self.freed.notify_one();
    }
}

/// Runs the accept loop forever. Before every accept, if `max_connections`
/// was set, blocks on the admission gate; spawns one detached worker
/// thread per accepted connection. An accept failure is fatal.
pub fn run(listener: TcpListener, max_connections: Option<u32>, stats: Stats) -> ! {
    let gate = max_connections.map(|cap| Arc::new(AdmissionGate::new(cap)));

    loop {
        if let Some(gate) = &gate {
            gate.acquire();
        }

        match listener.accept() {
            Ok((stream, _addr)) => {
                let stats = stats.clone();
                let gate = gate.clone();

                std::thread::spawn(move || {
                    worker::serve(stream, stats);
                    if let Some(gate) = gate {
                        gate.release();
                    }
                });
            },
            Err(e) => {
                eprintln!("accept failed: {e}");
                process::exit(EXIT_SERVER_ACCEPT_ERROR);
            },
        }
    }
}
