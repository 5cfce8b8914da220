//! Top-level error type.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop the supervisor. Per-server launch failures are not
/// among them; those are logged and skipped.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to install signal handlers: {0}")]
    Signal(#[source] std::io::Error),
}
