//! CLI module for svcwatch
//!
//! Provides command-line interface for the monitoring server.

/// serve サブコマンド
pub mod serve;

use clap::{Parser, Subcommand};

/// svcwatch - On-demand liveness monitor for registered services
#[derive(Parser, Debug)]
#[command(name = "svcwatch")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SVCWATCH_HOST                Bind address (default: 0.0.0.0)
    SVCWATCH_PORT                Listen port (default: 8000)
    SVCWATCH_DATA_FILE           Registry document (default: ./data/services_storage.json)
    SVCWATCH_PROBE_TIMEOUT_SECS  Probe timeout in seconds (default: 10)
    SVCWATCH_STATIC_DIR          Directory served for non-API paths
    SVCWATCH_LOG_LEVEL           Log level (default: info)
    SVCWATCH_LOG_DIR             Daily rotated log file directory
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the monitoring server
    Serve(serve::ServeArgs),
}
