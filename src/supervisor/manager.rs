//! Launching servers into the registry.

use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::LaunchConfig;
use crate::supervisor::command::CommandTemplate;
use crate::supervisor::launcher::{LaunchError, LaunchRequest, Launcher, ManagedChild};
use crate::supervisor::process::ManagedProcess;
use crate::supervisor::registry::ProcessRegistry;
use crate::supervisor::spec::ServerSpec;

/// Starts one external server per spec and hands them over in a registry.
pub struct Supervisor<L> {
    launcher: L,
    template: CommandTemplate,
    log_dir: PathBuf,
    startup_grace: Duration,
}

impl<L: Launcher> Supervisor<L> {
    pub fn new(launcher: L, config: &LaunchConfig) -> Self {
        Self {
            launcher,
            template: CommandTemplate::from_config(config),
            log_dir: config.log_dir.clone(),
            startup_grace: config.startup_grace(),
        }
    }

    /// `<log_dir>/server_<port>.log`
    pub fn log_path(&self, port: &str) -> PathBuf {
        self.log_dir.join(format!("server_{port}.log"))
    }

    /// Launch the server for `spec`.
    ///
    /// The log file is truncated and bound to the child's stdout and stderr.
    /// With a non-zero startup grace, a child that exits within the grace
    /// period counts as a failed launch.
    ///
    /// Does not look at other running servers: rejecting a port that is
    /// already held is up to the caller, as [`Supervisor::start_all`] does
    /// before the log file is touched.
    pub async fn start(&self, spec: &ServerSpec) -> Result<ManagedProcess<L::Child>, LaunchError> {
        let port = spec.port();
        if !spec.has_numeric_port() {
            tracing::warn!(server = %spec, port = %port, "Port is not numeric, passing it through as-is");
        }

        fs::create_dir_all(&self.log_dir).map_err(|source| LaunchError::LogDirectory {
            path: self.log_dir.clone(),
            source,
        })?;

        let log_path = self.log_path(port);
        let log = File::create(&log_path).map_err(|source| LaunchError::LogFile {
            path: log_path.clone(),
            source,
        })?;

        let request = LaunchRequest {
            port: port.to_string(),
            program: self.template.program().to_string(),
            args: self.template.render(port),
            log,
            log_path: log_path.clone(),
        };
        let child = self.launcher.launch(request).await?;
        let mut process = ManagedProcess::new(spec.clone(), log_path, child);

        if !self.startup_grace.is_zero() {
            tokio::time::sleep(self.startup_grace).await;
            match process.child_mut().try_exit_status() {
                Ok(None) => {}
                Ok(Some(status)) => return Err(LaunchError::ExitedEarly { status }),
                Err(source) => {
                    // Unknown state, don't leave it running untracked.
                    if let Err(e) = process.terminate().await {
                        tracing::warn!(
                            port = %port,
                            pid = ?process.pid(),
                            error = %e,
                            "Failed to stop server after status check error"
                        );
                    }
                    return Err(LaunchError::Probe { source });
                }
            }
        }

        process.mark_running();
        Ok(process)
    }

    /// Launch every spec in order. Failures are logged and skipped.
    pub async fn start_all(&self, specs: &[ServerSpec]) -> ProcessRegistry<L::Child> {
        let mut registry = ProcessRegistry::new();

        for spec in specs {
            tracing::info!(server = %spec, "Starting server");

            let result = if registry.holds_port(spec.port()) {
                Err(LaunchError::DuplicatePort {
                    port: spec.port().to_string(),
                })
            } else {
                self.start(spec).await
            };

            match result {
                Ok(process) => {
                    tracing::info!(
                        port = %process.port(),
                        pid = ?process.pid(),
                        log = %process.log_path().display(),
                        "Server started"
                    );
                    registry.push(process);
                }
                Err(e) => {
                    tracing::error!(server = %spec, port = %spec.port(), error = %e, "Failed to start server");
                }
            }
        }

        registry
    }
}

impl<L> std::fmt::Debug for Supervisor<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("template", &self.template)
            .field("log_dir", &self.log_dir)
            .field("startup_grace", &self.startup_grace)
            .finish()
    }
}
