//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGINT (Ctrl-C) and SIGTERM
//! - Translate the first signal into a [`Shutdown`] trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A second signal while servers are still being stopped exits
//!   immediately without waiting for them

use std::fmt;
use std::io;

use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;

/// Exit code used when a second signal aborts the shutdown sequence.
pub const FORCED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => f.write_str("SIGINT"),
            ShutdownSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Registered signal handlers.
pub struct SignalListener {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl SignalListener {
    /// Install the handlers. Fails if the runtime cannot register them.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self {})
    }

    /// Wait for the next shutdown signal.
    #[cfg(unix)]
    pub async fn recv(&mut self) -> ShutdownSignal {
        tokio::select! {
            _ = self.interrupt.recv() => ShutdownSignal::Interrupt,
            _ = self.terminate.recv() => ShutdownSignal::Terminate,
        }
    }

    #[cfg(not(unix))]
    pub async fn recv(&mut self) -> ShutdownSignal {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
        ShutdownSignal::Interrupt
    }
}

/// Trigger `shutdown` on the first signal; exit the process on the second.
pub fn spawn_signal_listener(mut signals: SignalListener, shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        let signal = signals.recv().await;
        tracing::info!(%signal, "Shutdown signal received, stopping the servers");
        shutdown.trigger();

        let signal = signals.recv().await;
        tracing::error!(%signal, "Second signal received, exiting without waiting for servers");
        std::process::exit(FORCED_EXIT_CODE);
    })
}
