//! Managed process state.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::supervisor::launcher::ManagedChild;
use crate::supervisor::spec::ServerSpec;

/// Lifecycle of one managed process. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Launching,
    Running,
    Terminating,
    Reaped,
}

impl ProcessState {
    pub fn can_transition_to(self, next: ProcessState) -> bool {
        matches!(
            (self, next),
            (ProcessState::Launching, ProcessState::Running)
                | (ProcessState::Launching, ProcessState::Terminating)
                | (ProcessState::Running, ProcessState::Terminating)
                | (ProcessState::Terminating, ProcessState::Reaped)
        )
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::Launching => "launching",
            ProcessState::Running => "running",
            ProcessState::Terminating => "terminating",
            ProcessState::Reaped => "reaped",
        };
        f.write_str(name)
    }
}

/// A server process owned by the supervisor.
#[derive(Debug)]
pub struct ManagedProcess<C> {
    spec: ServerSpec,
    pid: Option<u32>,
    log_path: PathBuf,
    state: ProcessState,
    child: C,
}

impl<C: ManagedChild> ManagedProcess<C> {
    /// Wrap a freshly spawned child. Starts in [`ProcessState::Launching`].
    pub fn new(spec: ServerSpec, log_path: PathBuf, child: C) -> Self {
        let pid = child.id();
        Self {
            spec,
            pid,
            log_path,
            state: ProcessState::Launching,
            child,
        }
    }

    pub fn port(&self) -> &str {
        self.spec.port()
    }

    /// Process id recorded at launch.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn child_mut(&mut self) -> &mut C {
        &mut self.child
    }

    pub fn mark_running(&mut self) {
        self.transition(ProcessState::Running);
    }

    /// Stop the process and wait for it. Ends in [`ProcessState::Reaped`]
    /// whether or not the child reported an error.
    pub async fn terminate(&mut self) -> io::Result<()> {
        self.transition(ProcessState::Terminating);
        let result = self.child.terminate().await;
        self.transition(ProcessState::Reaped);
        result
    }

    fn transition(&mut self, next: ProcessState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(port = %self.port(), from = %self.state, to = %next, "Process state change");
        self.state = next;
    }
}
