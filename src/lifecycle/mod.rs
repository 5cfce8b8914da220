//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Launch servers → Idle
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Idle wait ends → Terminate servers in order → Exit
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Trigger graceful shutdown
//!     Second signal → Immediate exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then servers one by one
//! - Ordered shutdown: same order as startup, one server at a time

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownListener};
pub use signals::{spawn_signal_listener, ShutdownSignal, SignalListener};
pub use startup::{prepare_config, run, run_with_launcher, RunOptions};
