//! Academy access gateway HTTP service.
//!
//! Thin transport over the gateway rule engines: the auth-callback and
//! root-page classifiers become redirect responses, the route guard becomes
//! a forward-auth endpoint for the fronting proxy, and the billing policy
//! table backs the payment-generation API.

#![deny(unsafe_code)]

pub mod config;
pub mod cookies;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod session_backend;
pub mod state;

pub use config::GatewayConfig;
pub use error::{ApiError, ApiResult, GatewayError, GatewayResult};
pub use router::create_router;
pub use server::Server;
pub use state::AppState;
