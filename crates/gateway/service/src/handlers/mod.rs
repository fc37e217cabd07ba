//! API handlers.

mod auth;
mod billing;
mod health;

pub use auth::{auth_callback, root, route_guard};
pub use billing::{generate_payments, get_recurrence, list_recurrences};
pub use health::health_check;
