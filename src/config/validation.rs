//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the launch template can actually carry a port
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Server entries are not validated: hosts are ignored and ports are passed
//!   through to the external program as written

use thiserror::Error;

use crate::config::schema::{SupervisorConfig, PORT_PLACEHOLDER};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("supervisor.program must not be empty")]
    EmptyProgram,
    #[error("supervisor.args must contain the {{port}} placeholder")]
    MissingPortPlaceholder,
    #[error("supervisor.log_dir must not be empty")]
    EmptyLogDir,
}

pub fn validate_config(config: &SupervisorConfig) -> Result<(), Vec<ValidationError>> {
    let launch = &config.supervisor;
    let mut errors = Vec::new();

    if launch.program.trim().is_empty() {
        errors.push(ValidationError::EmptyProgram);
    }
    if !launch.args.iter().any(|arg| arg.contains(PORT_PLACEHOLDER)) {
        errors.push(ValidationError::MissingPortPlaceholder);
    }
    if launch.log_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyLogDir);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        let config = SupervisorConfig::with_servers(["127.0.0.1:8001"]);
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let mut config = SupervisorConfig::with_servers(Vec::<String>::new());
        config.supervisor.program = "  ".into();
        config.supervisor.args = vec!["-m".into(), "http.server".into()];
        config.supervisor.log_dir = PathBuf::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyProgram,
                ValidationError::MissingPortPlaceholder,
                ValidationError::EmptyLogDir,
            ]
        );
    }

    #[test]
    fn placeholder_may_be_embedded() {
        let mut config = SupervisorConfig::with_servers(["h:1"]);
        config.supervisor.args = vec!["--bind=0.0.0.0:{port}".into()];
        assert!(validate_config(&config).is_ok());
    }
}
