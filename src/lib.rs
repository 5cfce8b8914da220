//! Backend server supervisor library.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod supervisor;

pub use config::SupervisorConfig;
pub use error::SupervisorError;
pub use lifecycle::Shutdown;
pub use supervisor::{ProcessRegistry, Supervisor};
