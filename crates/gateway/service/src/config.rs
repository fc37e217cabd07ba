//! Configuration for the gateway service.

use gateway_client::BackendConfig;
use gateway_session::DEFAULT_PUBLIC_ROUTES;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Main gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Data-backend connection settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Identity backend settings
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Route guard settings
    #[serde(default)]
    pub guard: GuardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backend: BackendConfig::default(),
            identity: IdentityConfig::default(),
            guard: GuardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            enable_cors: true,
        }
    }
}

/// Identity backend settings.
///
/// The session endpoint answers whether the presented token maps to an
/// active session; the gateway never inspects session contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Session lookup URL on the identity backend
    #[serde(default = "default_session_url")]
    pub session_url: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            session_url: default_session_url(),
        }
    }
}

/// Route guard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Routes reachable without a session
    #[serde(default = "default_public_routes")]
    pub public_routes: Vec<String>,

    /// Free-access development mode (root and login land on the dashboard)
    #[serde(default)]
    pub dev_mode: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            public_routes: default_public_routes(),
            dev_mode: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_listen_addr() -> SocketAddr {
    "127.0.0.1:8080".parse().expect("static listen address")
}

fn default_session_url() -> String {
    "http://127.0.0.1:9091/auth/session".to_string()
}

fn default_public_routes() -> Vec<String> {
    DEFAULT_PUBLIC_ROUTES.iter().map(|r| r.to_string()).collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl GatewayConfig {
    /// Load configuration from defaults, an optional file and the
    /// environment (`GATEWAY_` prefix), in that precedence order.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&GatewayConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("GATEWAY")
                .separator("_")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
