//! Process supervision subsystem.
//!
//! # Data Flow
//! ```text
//! servers (host:port)
//!     → spec.rs (derive port)
//!     → manager.rs (log dir, log file, command rendering)
//!     → launcher.rs (spawn external program)
//!     → registry.rs (ordered ManagedProcess list)
//!
//! On shutdown signal:
//!     registry.rs terminates each process in order
//!     → waits for exit → next process
//! ```
//!
//! # Design Decisions
//! - One failed launch never prevents the next one
//! - No restarts or health checks: a server that dies on its own is only
//!   noticed at shutdown, where stopping it is a no-op
//! - Termination is sequential; total shutdown time is the sum of each
//!   server's exit time

pub mod command;
pub mod launcher;
pub mod manager;
pub mod process;
pub mod registry;
pub mod spec;

pub use command::CommandTemplate;
pub use launcher::{ChildProcess, LaunchError, LaunchRequest, Launcher, ManagedChild, ProcessLauncher};
pub use manager::Supervisor;
pub use process::{ManagedProcess, ProcessState};
pub use registry::{ProcessRegistry, ShutdownReport, TerminationOutcome};
pub use spec::ServerSpec;
