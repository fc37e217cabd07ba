//! Academy access gateway daemon.
//!
//! Fronts the dashboard with:
//! - session classification for the root page and the auth callback
//! - a forward-auth route guard for the fronting proxy
//! - billing recurrence policy and payment-order generation APIs

use clap::Parser;
use gateway_client::BackendConfig;
use gateway_service::{GatewayConfig, GatewayError, GatewayResult, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Gateway daemon CLI.
#[derive(Parser)]
#[command(name = "gatewayd")]
#[command(about = "Academy access gateway", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "GATEWAY_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, env = "GATEWAY_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "GATEWAY_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> GatewayResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load configuration
    let mut config = GatewayConfig::load(cli.config.as_deref())
        .map_err(|e| GatewayError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| GatewayError::Config(format!("Invalid listen address: {}", e)))?;
    }

    // Fall back to the bare environment variables for the data backend, the
    // way operators of the previous deployment set them.
    if config.backend.endpoint.is_empty() {
        if let Ok(backend) = BackendConfig::from_env() {
            config.backend = backend;
        }
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        dev_mode = config.guard.dev_mode,
        "starting academy gateway"
    );

    let server = Server::new(config)?;
    server.run().await
}
