//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.json
//!     → loader.rs (read & deserialize, `servers` required)
//!     → CLI overrides (log dir, program)
//!     → validation.rs (semantic checks)
//!     → SupervisorConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Any load or validation error is fatal before a single server starts
//! - Launch settings have defaults so the plain load balancer config works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LaunchConfig, SupervisorConfig, PORT_PLACEHOLDER};
pub use validation::{validate_config, ValidationError};
