//! price-mux
//!
//! A path-routed HTTP server answering price lookups from an in-memory store.
//!
//! # Architecture Overview
//!
//! ```text
//!                              ┌───────────────────────────────────────────────┐
//!                              │                  PRICE-MUX                     │
//!     Client Request           │  ┌─────────┐    ┌──────────┐    ┌───────────┐ │
//!     ─────────────────────────┼─▶│  axum   │───▶│Dispatcher│───▶│ Handler   │ │
//!                              │  │ server  │    │ (routing)│    │ home/item/│ │
//!                              │  └────┬────┘    └──────────┘    │ list_all  │ │
//!                              │       │                         └─────┬─────┘ │
//!     Client Response          │       ▼                               ▼       │
//!     ◀────────────────────────┼── BufferedResponse ◀──────────── PriceStore   │
//!                              │                                               │
//!                              │  config · lifecycle · observability           │
//!                              └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use price_mux::config::{load_config, validate_config, ConfigError, ServerConfig};
use price_mux::lifecycle::{signals, startup, Application, Shutdown};
use price_mux::observability::{logging, metrics};
use price_mux::HttpServer;

#[derive(Parser)]
#[command(name = "price-mux")]
#[command(about = "Path-routed HTTP server for item prices", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address (e.g. 127.0.0.1:8081).
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

fn load(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }

    // Overrides can break an otherwise valid file.
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    logging::init(&config.observability.log_level);
    tracing::info!("price-mux v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let app = Application::build(&config)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = startup::bind(&config.listener).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::forward_to(shutdown.clone());

    let server = HttpServer::new(config, app.dispatcher);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
