//! Process launch abstraction.
//!
//! # Responsibilities
//! - Spawn the external server program with its output bound to a log file
//! - Terminate and reap it on request
//!
//! # Design Decisions
//! - Launching sits behind [`Launcher`] so the supervisor can be driven by
//!   fakes in tests
//! - Children outlive their handles (no kill-on-drop); only an explicit
//!   [`ManagedChild::terminate`] stops them
//! - Terminating an already-exited child is a successful no-op

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::{Child, Command};

/// Why a single server could not be started. Never fatal to the supervisor.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("port {port} is already held by a running server")]
    DuplicatePort { port: String },
    #[error("failed to create log directory {}: {source}", .path.display())]
    LogDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("process exited during startup ({status})")]
    ExitedEarly { status: ExitStatus },
    #[error("failed to check process status: {source}")]
    Probe {
        #[source]
        source: io::Error,
    },
}

/// Everything needed to start one server.
#[derive(Debug)]
pub struct LaunchRequest {
    pub port: String,
    pub program: String,
    pub args: Vec<String>,
    /// Receives both stdout and stderr of the child.
    pub log: File,
    pub log_path: PathBuf,
}

/// A launched process the supervisor must eventually stop.
#[async_trait]
pub trait ManagedChild: Send {
    /// OS process id, `None` once reaped.
    fn id(&self) -> Option<u32>;

    /// Non-blocking check for an exit that already happened.
    fn try_exit_status(&mut self) -> io::Result<Option<ExitStatus>>;

    /// Ask the process to stop gracefully and wait until it has exited.
    async fn terminate(&mut self) -> io::Result<()>;
}

#[async_trait]
pub trait Launcher: Send + Sync {
    type Child: ManagedChild;

    async fn launch(&self, request: LaunchRequest) -> Result<Self::Child, LaunchError>;
}

/// Launches real OS processes through `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

#[async_trait]
impl Launcher for ProcessLauncher {
    type Child = ChildProcess;

    async fn launch(&self, request: LaunchRequest) -> Result<ChildProcess, LaunchError> {
        let LaunchRequest {
            program,
            args,
            log,
            log_path,
            ..
        } = request;

        let stderr = log.try_clone().map_err(|source| LaunchError::LogFile {
            path: log_path,
            source,
        })?;

        let child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(stderr))
            .kill_on_drop(false)
            .spawn()
            .map_err(|source| LaunchError::Spawn { program, source })?;

        Ok(ChildProcess { child })
    }
}

/// Handle to a process started by [`ProcessLauncher`].
#[derive(Debug)]
pub struct ChildProcess {
    child: Child,
}

impl ChildProcess {
    #[cfg(unix)]
    fn request_stop(&mut self) -> io::Result<()> {
        use nix::errno::Errno;
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let Some(pid) = self.child.id() else {
            return Ok(());
        };

        #[allow(clippy::cast_possible_wrap)]
        let pid = Pid::from_raw(pid as i32);
        match kill(pid, Signal::SIGTERM) {
            Ok(()) | Err(Errno::ESRCH) => Ok(()),
            Err(errno) => Err(io::Error::from(errno)),
        }
    }

    #[cfg(not(unix))]
    fn request_stop(&mut self) -> io::Result<()> {
        match self.child.start_kill() {
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(()),
            other => other,
        }
    }
}

#[async_trait]
impl ManagedChild for ChildProcess {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn try_exit_status(&mut self) -> io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    async fn terminate(&mut self) -> io::Result<()> {
        if let Some(status) = self.child.try_wait()? {
            tracing::debug!(%status, "Process had already exited");
            return Ok(());
        }

        self.request_stop()?;
        let status = self.child.wait().await?;
        tracing::debug!(%status, "Process exited");
        Ok(())
    }
}
