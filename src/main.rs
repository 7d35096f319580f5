//! Main entry point for the Scrabble Words service
//!
//! Loads configuration, initializes logging, and serves the random word and
//! word validation endpoints until a shutdown signal arrives.

use anyhow::Result;
use clap::Parser;
use scrabble_words::api::{ApiServer, ApiServerConfig};
use scrabble_words::config::{validate_config, AppConfig};
use scrabble_words::service::{AppState, HealthCheck, HealthStatus};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

/// Scrabble Words Service - random words and word validation
#[derive(Parser)]
#[command(
    name = "scrabble-words",
    version,
    about = "A word lookup microservice for random Scrabble words and word validation",
    long_about = "Scrabble Words serves two read-only lookups over a MySQL table of valid words: \
                 a uniformly random word, optionally of a given length, and a check of whether \
                 a supplied word is valid."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Perform health check and exit
    #[arg(long, help = "Check word store connectivity and exit with status code")]
    health_check: bool,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Bind address override
    #[arg(long, value_name = "ADDR", help = "Override HTTP bind address")]
    bind: Option<String>,

    /// HTTP port override
    #[arg(long, value_name = "PORT", help = "Override HTTP server port")]
    http_port: Option<u16>,

    /// Database host override
    #[arg(long, value_name = "HOST", help = "Override word store host (host or host:port)")]
    db_host: Option<String>,

    /// Database name override
    #[arg(long, value_name = "NAME", help = "Override word store database name")]
    db_name: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without starting service"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Perform health check and return appropriate exit code
async fn perform_health_check(config: AppConfig) -> Result<()> {
    info!("Performing health check...");

    let app_state = Arc::new(AppState::new(config).await?);
    app_state.start().await;

    match HealthCheck::check(app_state).await {
        Ok(health) => {
            println!("Health Check: {}", health.status);
            for check in &health.checks {
                match &check.message {
                    Some(message) => println!("  {}: {} ({})", check.name, check.status, message),
                    None => println!("  {}: {}", check.name, check.status),
                }
            }
            if let Some(total) = health.stats.total_words {
                println!("  Words: {}", total);
            }

            if health.status == HealthStatus::Healthy {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("Health check failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

/// Display startup banner with service information
fn display_startup_banner(config: &AppConfig) {
    info!("🔤 Scrabble Words Service");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   Listening: {}:{}",
        config.service.bind_address, config.service.http_port
    );
    info!("   Word store: {}", config.database.redacted_address());
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Load and merge configuration from environment/file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(bind) = &args.bind {
        config.service.bind_address = bind.clone();
    }

    if let Some(http_port) = args.http_port {
        config.service.http_port = http_port;
    }

    if let Some(db_host) = &args.db_host {
        config.database.host = db_host.clone();
    }

    if let Some(db_name) = &args.db_name {
        config.database.database = db_name.clone();
    }

    validate_config(&config)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Some(config_path) = &args.config {
        info!("Loaded configuration from: {}", config_path.display());
    }

    // Handle special modes
    if args.health_check {
        return perform_health_check(config).await;
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_startup_banner(&config);
        info!("Dry run completed - exiting without starting service");
        return Ok(());
    }

    display_startup_banner(&config);

    // Initialize application state
    info!("Initializing service components...");
    let app_state = match AppState::new(config.clone()).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let server = Arc::new(ApiServer::new(
        ApiServerConfig {
            port: config.service.http_port,
            host: config.service.bind_address.clone(),
        },
        app_state.clone(),
    ));

    app_state.start().await;

    let mut server_task = {
        let server = server.clone();
        tokio::spawn(async move { server.start().await })
    };

    info!("✅ Scrabble Words Service is running");
    info!("Press Ctrl+C to shutdown gracefully...");

    tokio::select! {
        _ = wait_for_shutdown_signal() => {
            info!("🛑 Shutdown signal received, beginning graceful shutdown...");
        }
        result = &mut server_task => {
            app_state.shutdown().await;
            match result {
                Ok(Ok(())) => warn!("API server exited unexpectedly"),
                Ok(Err(e)) => error!("API server failed: {:#}", e),
                Err(e) => error!("API server task panicked: {}", e),
            }
            std::process::exit(1);
        }
    }

    app_state.shutdown().await;
    server.stop();

    match tokio::time::timeout(config.shutdown_timeout(), server_task).await {
        Ok(_) => {
            info!("✅ Graceful shutdown completed successfully");
        }
        Err(_) => {
            warn!("⚠️  Shutdown timeout exceeded, forcing exit");
        }
    }

    info!("🛑 Scrabble Words Service stopped");
    Ok(())
}
