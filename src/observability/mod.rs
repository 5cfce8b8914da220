//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / supervisor / lifecycle
//!     → tracing events (start attempt, start result, idle,
//!       shutdown start, per-server termination, completion)
//!     → logging.rs subscriber → console
//! ```

pub mod logging;

pub use logging::{init_logging, DEFAULT_FILTER};
