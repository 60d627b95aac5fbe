//! # Pharmflow Server Main Driver
//!
//! ## Purpose
//! Main entry point for the drug-discovery workflow server. Orchestrates
//! initialization of all system components and starts the web server.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration files, command line arguments, environment variables
//! - **Output**: Running web server with workflow API endpoints
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Initialize the target selector (creates the durable cache directory)
//! 4. Start web API server
//! 5. Handle shutdown signals gracefully

use clap::{Arg, Command};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use pharmflow::{
    api::ApiServer,
    config::Config,
    errors::{DiscoveryError, Result},
    planner::SciencePlanner,
    targets::TargetSelector,
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("pharmflow-server")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Pharmflow Team")
        .about("Skeletal drug-discovery workflow service with RCSB PDB target search")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Server port")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("check-health")
                .long("check-health")
                .help("Validate configuration and cache paths, then exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Load configuration
    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = Config::from_file(config_path)?;

    // Override port if specified
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }

    let config = Arc::new(config);

    // Initialize logging
    init_logging(&config)?;

    info!("Starting Pharmflow v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", config_path);

    // Run health checks if requested
    if matches.get_flag("check-health") {
        return run_health_checks(&config).await;
    }

    // Initialize application components
    let app_state = initialize_components(config.clone()).await?;

    // Start the API server. The actix server future is not Send, so it is
    // polled on this task rather than spawned onto the runtime.
    let server = ApiServer::new(app_state).await?;

    info!(
        "Pharmflow started successfully on {}:{}",
        config.server.host, config.server.port
    );

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        result = server.run() => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
            warn!("Server stopped unexpectedly");
        }
    }

    info!("Pharmflow shut down successfully");
    Ok(())
}

/// Initialize logging and tracing
fn init_logging(config: &Config) -> Result<()> {
    let log_level: tracing::Level =
        config
            .logging
            .level
            .parse()
            .map_err(|_| DiscoveryError::Config {
                message: format!("Invalid log level: {}", config.logging.level),
            })?;
    let filter = tracing_subscriber::filter::LevelFilter::from_level(log_level);

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .json()
                    .with_filter(filter),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_filter(filter),
            )
            .init();
    }

    info!("Logging initialized with level: {}", config.logging.level);
    Ok(())
}

/// Initialize all application components
async fn initialize_components(config: Arc<Config>) -> Result<AppState> {
    info!("Initializing application components...");

    info!("Initializing target selector...");
    let selector = Arc::new(TargetSelector::new(config.targets.clone()).await?);
    selector.health_check().await?;
    info!("✓ Target selector is healthy");

    let planner = Arc::new(SciencePlanner::new());

    let app_state = AppState {
        config,
        selector,
        planner,
    };

    info!("All components initialized successfully");
    Ok(app_state)
}

/// Run health checks and exit
async fn run_health_checks(config: &Config) -> Result<()> {
    info!("Running health checks...");

    config.validate()?;
    info!("✓ Configuration is valid");

    // Building the selector creates and probes the cache directory
    let selector = TargetSelector::new(config.targets.clone()).await?;
    selector.health_check().await?;
    info!("✓ Target cache directory is writable");

    info!("All health checks passed!");
    Ok(())
}
