//! svcwatch Server Entry Point

use clap::Parser;
use svcwatch::cli::{Cli, Commands};
use svcwatch::common::config::MonitorConfig;
use svcwatch::config::monitor_config_from_env;
use svcwatch::{logging, server};
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let config = match cli.command {
        Some(Commands::Serve(args)) => args.apply_to(monitor_config_from_env()),
        // No subcommand - default to serve
        None => monitor_config_from_env(),
    };

    if let Err(e) = run_server(config).await {
        error!("svcwatch terminated: {}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: MonitorConfig) -> svcwatch::common::error::MonitorResult<()> {
    let state = server::build_state(&config).await?;
    server::run(state, &config.bind_addr()).await
}
