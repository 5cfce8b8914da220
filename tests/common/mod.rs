//! Shared utilities for supervisor integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backend_supervisor::config::LaunchConfig;
use backend_supervisor::supervisor::{LaunchError, LaunchRequest, Launcher, ManagedChild};

/// Something the fake launcher observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Launched(String),
    Terminated(String),
}

/// Arguments of one launch request.
#[derive(Debug, Clone)]
pub struct RecordedLaunch {
    pub port: String,
    pub program: String,
    pub args: Vec<String>,
    pub log_path: PathBuf,
}

#[derive(Debug, Default)]
struct MockState {
    next_pid: u32,
    spawn_failures: HashSet<String>,
    early_exits: HashSet<String>,
    terminate_failures: HashSet<String>,
    status_failures: HashSet<String>,
    launches: Vec<RecordedLaunch>,
    events: Vec<Event>,
}

/// Launcher that records requests instead of spawning processes.
#[derive(Clone, Default)]
pub struct MockLauncher {
    state: Arc<Mutex<MockState>>,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawning for `port` fails like a missing program.
    pub fn fail_spawn(self, port: &str) -> Self {
        self.state.lock().unwrap().spawn_failures.insert(port.to_string());
        self
    }

    /// The child for `port` reports as exited right after launch.
    pub fn exit_early(self, port: &str) -> Self {
        self.state.lock().unwrap().early_exits.insert(port.to_string());
        self
    }

    /// Checking the exit status of the child for `port` returns an error.
    pub fn fail_status(self, port: &str) -> Self {
        self.state.lock().unwrap().status_failures.insert(port.to_string());
        self
    }

    /// Terminating the child for `port` returns an error.
    pub fn fail_terminate(self, port: &str) -> Self {
        self.state.lock().unwrap().terminate_failures.insert(port.to_string());
        self
    }

    pub fn launches(&self) -> Vec<RecordedLaunch> {
        self.state.lock().unwrap().launches.clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn terminated(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Terminated(port) => Some(port),
                Event::Launched(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl Launcher for MockLauncher {
    type Child = MockChild;

    async fn launch(&self, request: LaunchRequest) -> Result<MockChild, LaunchError> {
        let mut state = self.state.lock().unwrap();
        state.launches.push(RecordedLaunch {
            port: request.port.clone(),
            program: request.program.clone(),
            args: request.args.clone(),
            log_path: request.log_path.clone(),
        });

        if state.spawn_failures.contains(&request.port) {
            return Err(LaunchError::Spawn {
                program: request.program,
                source: io::Error::new(io::ErrorKind::NotFound, "no such program"),
            });
        }

        let mut log = &request.log;
        writeln!(log, "serving {}", request.port).unwrap();

        state.next_pid += 1;
        let pid = 1000 + state.next_pid;
        state.events.push(Event::Launched(request.port.clone()));

        Ok(MockChild {
            port: request.port.clone(),
            pid: Some(pid),
            exited: state.early_exits.contains(&request.port),
            fail_terminate: state.terminate_failures.contains(&request.port),
            fail_status: state.status_failures.contains(&request.port),
            state: Arc::clone(&self.state),
        })
    }
}

#[derive(Debug)]
pub struct MockChild {
    port: String,
    pid: Option<u32>,
    exited: bool,
    fail_terminate: bool,
    fail_status: bool,
    state: Arc<Mutex<MockState>>,
}

#[async_trait]
impl ManagedChild for MockChild {
    fn id(&self) -> Option<u32> {
        self.pid
    }

    fn try_exit_status(&mut self) -> io::Result<Option<ExitStatus>> {
        if self.fail_status {
            return Err(io::Error::new(io::ErrorKind::Other, "status unavailable"));
        }
        Ok(self.exited.then(|| exit_status(1)))
    }

    async fn terminate(&mut self) -> io::Result<()> {
        self.state
            .lock()
            .unwrap()
            .events
            .push(Event::Terminated(self.port.clone()));
        self.pid = None;

        if self.fail_terminate {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "operation not permitted"))
        } else {
            Ok(())
        }
    }
}

#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Launch settings writing logs under `dir/logs`, no startup grace.
pub fn launch_config(dir: &Path) -> LaunchConfig {
    LaunchConfig {
        log_dir: dir.join("logs"),
        startup_grace_ms: 0,
        ..LaunchConfig::default()
    }
}

/// Write a config.json into `dir` and return its path.
pub fn write_config(dir: &Path, config: &serde_json::Value) -> PathBuf {
    let path = dir.join("config.json");
    std::fs::write(&path, serde_json::to_vec_pretty(config).unwrap()).unwrap();
    path
}
