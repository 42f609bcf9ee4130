//! HostMonk CLI
//!
//! Command-line interface for the self-hosted service dashboard.

use std::path::PathBuf;

use clap::Parser;
use hostmonk::{load_config_or_default, DEFAULT_PORT};
use tracing::Level;

#[derive(Parser)]
#[command(name = "hostmonk")]
#[command(about = "Self-hosted service dashboard with liveness monitoring")]
#[command(version)]
struct Args {
    /// Path to the YAML service configuration
    #[arg(short, long, default_value = "config/services.yaml")]
    config: PathBuf,

    /// Dashboard port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, port={}, log_level={:?}",
        args.config,
        args.port,
        args.log_level
    );

    let config = load_config_or_default(&args.config);

    tracing::info!("Starting HostMonk");
    tracing::debug!(
        "Services: {}, theme: {}, refresh interval: {}ms, ping enabled: {}",
        config.services.len(),
        config.theme,
        config.settings.refresh_interval_ms,
        config.settings.enable_ping
    );

    hostmonk::run(config, args.port).await?;

    Ok(())
}
