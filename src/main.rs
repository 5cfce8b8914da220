//! Backend server supervisor.
//!
//! Launches one HTTP file server per `host:port` entry of the load balancer's
//! `config.json`, and stops them all on Ctrl-C.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.json ──▶ config ──▶ supervisor ──▶ python3 -m http.server 8001 ──▶ logs/server_8001.log
//!                                  │        ──▶ python3 -m http.server 8002 ──▶ logs/server_8002.log
//!                                  ▼
//!                           ProcessRegistry
//!                                  │
//!   SIGINT/SIGTERM ──▶ lifecycle ──┘ terminate + wait, in order
//! ```

use std::path::PathBuf;

use clap::Parser;

use backend_supervisor::lifecycle::{self, RunOptions, Shutdown, SignalListener};
use backend_supervisor::observability;
use backend_supervisor::SupervisorError;

#[derive(Parser)]
#[command(name = "backend-supervisor")]
#[command(about = "Launch and supervise the load balancer's backend servers", long_about = None)]
struct Cli {
    /// Config file with the `servers` list.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Directory for per-server log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Program used to serve each port.
    #[arg(long)]
    program: Option<String>,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config_path: cli.config,
            log_dir: cli.log_dir,
            program: cli.program,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    observability::init_logging(observability::DEFAULT_FILTER);
    tracing::info!("backend-supervisor v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    let signals = SignalListener::install().map_err(SupervisorError::Signal)?;
    lifecycle::spawn_signal_listener(signals, shutdown.clone());

    let options = RunOptions::from(cli);
    let report = lifecycle::run(&options, &shutdown).await?;

    if !report.all_clean() {
        tracing::warn!(
            stopped = report.len(),
            "Some servers reported errors while stopping"
        );
    }
    tracing::info!("Shutdown complete");
    Ok(())
}
