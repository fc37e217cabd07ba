//! Authoritative session classification via live identity-backend lookup.

use async_trait::async_trait;
use gateway_types::RoutingDecision;
use thiserror::Error;

/// Live session lookup against the identity backend.
///
/// Implementations report only presence or absence of an active session for
/// the supplied token; session contents are never inspected by the gateway.
#[async_trait]
pub trait SessionLookup: Send + Sync {
    async fn has_active_session(&self, token: Option<&str>)
        -> Result<bool, SessionLookupError>;
}

/// Failure talking to the identity backend.
#[derive(Debug, Error)]
#[error("session lookup failed: {0}")]
pub struct SessionLookupError(pub String);

/// Root-page classifier: one live lookup against the identity backend.
///
/// Unlike [`classify_callback`](crate::classify_callback), this does not
/// trust cookie presence. An active session routes to the dashboard, absence
/// routes to login. Lookup failures propagate to the caller; retry and
/// timeout policy belong to the backend client, not here.
pub async fn classify_root(
    lookup: &dyn SessionLookup,
    token: Option<&str>,
) -> Result<RoutingDecision, SessionLookupError> {
    if lookup.has_active_session(token).await? {
        Ok(RoutingDecision::RedirectToDashboard)
    } else {
        Ok(RoutingDecision::RedirectToLogin)
    }
}
