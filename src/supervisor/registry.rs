//! Registry of running servers and the shutdown sequence.

use std::io;

use crate::supervisor::launcher::ManagedChild;
use crate::supervisor::process::ManagedProcess;

/// Ordered collection of managed processes, in config order.
///
/// Holds exactly the servers whose launch succeeded. Filled during startup and
/// consumed by [`ProcessRegistry::shutdown`].
#[derive(Debug)]
pub struct ProcessRegistry<C> {
    processes: Vec<ManagedProcess<C>>,
}

impl<C: ManagedChild> ProcessRegistry<C> {
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
        }
    }

    pub fn push(&mut self, process: ManagedProcess<C>) {
        self.processes.push(process);
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManagedProcess<C>> {
        self.processes.iter()
    }

    pub fn ports(&self) -> Vec<&str> {
        self.processes.iter().map(|p| p.port()).collect()
    }

    pub fn holds_port(&self, port: &str) -> bool {
        self.processes.iter().any(|p| p.port() == port)
    }

    /// Terminate and reap every process, one at a time, in registry order.
    ///
    /// A failure on one process is logged and recorded; the remaining
    /// processes are still terminated.
    pub async fn shutdown(self) -> ShutdownReport {
        if self.processes.is_empty() {
            tracing::info!("No servers were running, nothing to shut down");
            return ShutdownReport::default();
        }

        let mut report = ShutdownReport::default();
        for mut process in self.processes {
            tracing::info!(
                port = %process.port(),
                pid = ?process.pid(),
                "Shutting down server"
            );

            let error = match process.terminate().await {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!(
                        port = %process.port(),
                        pid = ?process.pid(),
                        error = %e,
                        "Server did not shut down cleanly, continuing"
                    );
                    Some(e)
                }
            };

            report.outcomes.push(TerminationOutcome {
                port: process.port().to_string(),
                pid: process.pid(),
                error,
            });
        }

        tracing::info!(count = report.len(), "All servers have been shut down");
        report
    }
}

impl<C: ManagedChild> Default for ProcessRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of terminating one process.
#[derive(Debug)]
pub struct TerminationOutcome {
    pub port: String,
    pub pid: Option<u32>,
    /// Tolerated error from terminate or wait.
    pub error: Option<io::Error>,
}

impl TerminationOutcome {
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-process outcomes in the order they were terminated.
#[derive(Debug, Default)]
pub struct ShutdownReport {
    pub outcomes: Vec<TerminationOutcome>,
}

impl ShutdownReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn ports(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.port.as_str()).collect()
    }

    pub fn all_clean(&self) -> bool {
        self.outcomes.iter().all(TerminationOutcome::is_clean)
    }
}
