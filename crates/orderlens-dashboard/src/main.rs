//! OrderLens - Main Entry Point

use anyhow::Result;
use clap::Parser;
use orderlens_dashboard::{cli, Cli};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let config = args.load_config()?;
    cli::init_tracing(&config)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting OrderLens");
    info!(
        dataset = %config.dataset.path,
        locale = %config.dashboard.locale,
        bind = %config.server.bind,
        "Configuration loaded"
    );

    if let Err(e) = cli::run(args, config).await {
        error!("OrderLens exited with an error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
