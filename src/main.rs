//! poor-tools Web Installer Entry Point
//!
//! This is the main entry point for the web installer. It initializes
//! logging, loads configuration, and starts the HTTP server.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use poor_installer_web::core::{Cli, Config, InstallerServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from .env, environment and flags
    let mut config = Config::from_env();
    Cli::parse().apply(&mut config);

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let config = match config.resolve() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let server = InstallerServer::new(config.clone());

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport
        .run(server)
        .await
        .context("HTTP transport failed")?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// `RUST_LOG` directives are honored; the configured level is added on top.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
