//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Launch every configured server in order
//! - Idle until shutdown, then stop every launched server
//!
//! # Design Decisions
//! - Fail fast: a configuration error is fatal before anything is launched
//! - A launch error only drops that one server
//! - The idle phase waits on the shutdown channel, no polling

use std::path::PathBuf;

use crate::config::{load_config, validate_config, ConfigError, SupervisorConfig};
use crate::error::SupervisorError;
use crate::lifecycle::Shutdown;
use crate::supervisor::{Launcher, ProcessLauncher, ServerSpec, ShutdownReport, Supervisor};

/// Inputs to a supervisor run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: PathBuf,
    /// Overrides `supervisor.log_dir`.
    pub log_dir: Option<PathBuf>,
    /// Overrides `supervisor.program`.
    pub program: Option<String>,
}

impl RunOptions {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            log_dir: None,
            program: None,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new("config.json")
    }
}

/// Read the config, apply overrides, then validate.
pub fn prepare_config(options: &RunOptions) -> Result<SupervisorConfig, ConfigError> {
    let mut config = load_config(&options.config_path)?;

    if let Some(log_dir) = &options.log_dir {
        config.supervisor.log_dir = log_dir.clone();
    }
    if let Some(program) = &options.program {
        config.supervisor.program = program.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Run the supervisor with real OS processes.
pub async fn run(options: &RunOptions, shutdown: &Shutdown) -> Result<ShutdownReport, SupervisorError> {
    run_with_launcher(options, ProcessLauncher, shutdown).await
}

/// Run the supervisor with any launcher.
pub async fn run_with_launcher<L: Launcher>(
    options: &RunOptions,
    launcher: L,
    shutdown: &Shutdown,
) -> Result<ShutdownReport, SupervisorError> {
    let config = prepare_config(options)?;

    tracing::info!(
        config = %options.config_path.display(),
        servers = config.servers.len(),
        program = %config.supervisor.program,
        log_dir = %config.supervisor.log_dir.display(),
        "Configuration loaded"
    );

    let specs: Vec<ServerSpec> = config.servers.iter().map(ServerSpec::from).collect();
    let supervisor = Supervisor::new(launcher, &config.supervisor);
    let mut listener = shutdown.subscribe();

    let registry = supervisor.start_all(&specs).await;
    tracing::info!(
        running = registry.len(),
        configured = specs.len(),
        ports = ?registry.ports(),
        "Startup complete, waiting for shutdown signal"
    );

    listener.recv().await;

    tracing::info!(running = registry.len(), "Stopping the servers");
    Ok(registry.shutdown().await)
}
