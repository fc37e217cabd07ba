//! Server setup and lifecycle management.

use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use crate::router::create_router;
use crate::session_backend::HttpSessionLookup;
use crate::state::AppState;
use gateway_client::{select_authority, DataClient};
use gateway_session::SessionLookup;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Gateway HTTP server.
pub struct Server {
    config: GatewayConfig,
    sessions: Arc<dyn SessionLookup>,
}

impl Server {
    /// Create a new server with the given configuration.
    ///
    /// Data-backend configuration is validated here: a missing or malformed
    /// endpoint aborts startup instead of misrouting every later call.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let authority = select_authority(None, config.backend.admin_secret.as_deref());
        DataClient::new(&config.backend, authority)?;

        let sessions = Arc::new(HttpSessionLookup::new(&config.identity.session_url)?);

        Ok(Self { config, sessions })
    }

    /// Create a server with an injected session lookup (test seam).
    pub fn with_session_lookup(
        config: GatewayConfig,
        sessions: Arc<dyn SessionLookup>,
    ) -> Self {
        Self { config, sessions }
    }

    /// Run the server until shutdown.
    pub async fn run(self) -> GatewayResult<()> {
        let addr = self.config.server.listen_addr;

        let state = AppState::new(self.config, self.sessions);
        let app = create_router(state);

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("gateway listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| crate::error::GatewayError::Server(e.to_string()))?;

        tracing::info!("gateway shutting down");

        Ok(())
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
