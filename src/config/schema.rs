//! Configuration schema definitions.
//!
//! The supervisor reads the same `config.json` as the load balancer sitting in
//! front of the servers it launches. Only `servers` is required; every other
//! load balancer key is ignored. Supervisor-specific settings live under an
//! optional `supervisor` section.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Placeholder substituted with the derived port in command arguments.
pub const PORT_PLACEHOLDER: &str = "{port}";

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SupervisorConfig {
    /// Server addresses in `host:port` form, launched in this order.
    pub servers: Vec<String>,

    /// Launch settings.
    #[serde(default)]
    pub supervisor: LaunchConfig,
}

impl SupervisorConfig {
    /// Build a config for `servers` with default launch settings.
    pub fn with_servers<I, S>(servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            servers: servers.into_iter().map(Into::into).collect(),
            supervisor: LaunchConfig::default(),
        }
    }
}

/// How each server process is launched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// External program to run (e.g., "python3").
    pub program: String,

    /// Arguments; `{port}` is replaced with the server's port.
    pub args: Vec<String>,

    /// Directory holding `server_<port>.log` files.
    pub log_dir: PathBuf,

    /// How long to watch a fresh process before declaring the launch good.
    /// Zero disables the check.
    pub startup_grace_ms: u64,
}

impl LaunchConfig {
    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms)
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec![
                "-m".to_string(),
                "http.server".to_string(),
                PORT_PLACEHOLDER.to_string(),
            ],
            log_dir: PathBuf::from("logs"),
            startup_grace_ms: 200,
        }
    }
}
