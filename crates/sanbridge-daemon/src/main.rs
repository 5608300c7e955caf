//! Sanbridge Daemon - Main entry point
//!
//! Attaches the Surface platform sub-devices through the firmware bridge
//! and serves the resulting status endpoints.

mod api;
mod config;
mod server;
mod state;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "sanbridge")]
#[command(about = "Surface platform firmware bridge daemon")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "sanbridge.toml")]
    config: PathBuf,

    /// Bind address for the status server
    #[arg(short, long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Attach the platform devices, print each report, and exit
    #[arg(long)]
    attach_once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Sanbridge v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = config::load_config(&args.config)?;

    // Override bind address if specified
    if let Some(bind) = args.bind {
        config.daemon.bind = bind;
    }

    let state = state::AppState::new(config.clone());

    // Attach whatever the platform exposes
    let reports = state.attach_all().await;
    if reports.is_empty() {
        info!("No platform devices found");
    }

    if args.attach_once {
        // Single attach mode
        for report in &reports {
            print!("{}", report.summary());
        }
        state.detach().await;
    } else {
        // Daemon mode - serve status endpoints until shutdown
        server::run(state, &config.daemon.bind).await?;
    }

    Ok(())
}
