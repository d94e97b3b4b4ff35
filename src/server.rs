//! Server top-level wiring: bind, install signal handling, run the
//! dispatcher.

use log::info;
use signal_hook::consts::SIGPIPE;
use signal_hook::iterator::Signals;

use crate::cli::ServerArgs;
use crate::config::{is_valid_port, ServerConfig};
use crate::consts::{EXIT_SERVER_CLI_ERROR, EXIT_SERVER_LISTEN_ERROR};
use crate::stats::{self, Stats};
use crate::{dispatcher, DEFAULT_NAME};

/// Owns the listening socket and the process-wide stats handle.
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// Builds a `Server` from validated CLI args.
    ///
    /// Exits with `EXIT_SERVER_CLI_ERROR` if `--port` falls outside "0" or
    /// [1024, 65535]; `clap`'s own range check on `ServerArgs::port` covers
    /// the upper bound, so this only needs to catch ports below 1024 that
    /// are not the ephemeral sentinel.
    #[must_use]
    pub fn new(args: &ServerArgs) -> Self {
        if !is_valid_port(args.port) {
            eprintln!("invalid port: {}", args.port);
            std::process::exit(EXIT_SERVER_CLI_ERROR);
        }

        Self { config: ServerConfig::from(args) }
    }

    /// Binds the listening socket, announces the effective port, installs
    /// signal handling, and runs the dispatcher forever.
    ///
    /// Exits the process directly (rather than returning an error) on bind
    /// failure, matching the fatal-at-startup contract for C1.
    pub fn run(self) -> ! {
        info!("starting {DEFAULT_NAME}");

        let (listener, port) = self.config.bind_listener().unwrap_or_else(|e| {
            eprintln!("failed to bind listener: {e}");
            std::process::exit(EXIT_SERVER_LISTEN_ERROR);
        });

        eprintln!("{port}");

        ignore_sigpipe();

        let stats = Stats::new();
        stats::spawn_reporter(stats.clone());

        dispatcher::run(listener, self.config.max_connections, stats);
    }
}

/// Disposes of `SIGPIPE` process-wide before any worker starts, so a write
/// to a dead peer surfaces as an ordinary I/O error instead of killing the
/// process.
///
/// Installing any handler (even one that does nothing with the signal)
/// replaces the default terminate-on-delivery disposition, which is all
/// this needs: nothing reads from this iterator past the spawn.
fn ignore_sigpipe() {
    let mut signals = Signals::new([SIGPIPE]).expect("failed to register SIGPIPE handler");
    std::thread::spawn(move || {
        for _ in signals.forever() {
            // Deliberately discarded: the goal is solely to suppress the
            // default terminate-the-process action.
        }
    });
}
