//! Application state for API handlers.

use crate::config::GatewayConfig;
use gateway_session::{RouteGuard, SessionLookup};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Process configuration, assembled once at startup
    pub config: Arc<GatewayConfig>,

    /// Route guard built from the guard configuration
    pub guard: RouteGuard,

    /// Identity-backend session lookup
    pub sessions: Arc<dyn SessionLookup>,

    /// Service version
    pub version: String,

    /// Service start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: GatewayConfig, sessions: Arc<dyn SessionLookup>) -> Self {
        let guard = RouteGuard::new(config.guard.public_routes.clone(), config.guard.dev_mode);

        Self {
            config: Arc::new(config),
            guard,
            sessions,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Get uptime as a human-readable string.
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        let secs = duration.num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        }
    }
}
