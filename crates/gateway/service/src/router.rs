//! API router configuration.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/billing/recurrences", get(handlers::list_recurrences))
        .route("/billing/recurrences/:key", get(handlers::get_recurrence))
        .route("/payments/generate", post(handlers::generate_payments));

    Router::new()
        // Session classification entry points
        .route("/", get(handlers::root))
        .route("/auth/callback", get(handlers::auth_callback))
        .route("/auth/guard", get(handlers::route_guard))
        // Health
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
