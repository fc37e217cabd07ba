//! Session classification handlers.

use crate::cookies;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use gateway_session::{classify_callback, classify_root};
use gateway_types::{RoutingDecision, SessionEvidence};
use serde::Deserialize;

/// Query parameters accepted by the auth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub next: Option<String>,
}

/// `GET /auth/callback` — cookie-presence heuristic redirect.
///
/// An explicit `next` target wins over everything, then a token cookie routes
/// to the dashboard, otherwise to login. Always answers with a redirect.
pub async fn auth_callback(
    State(_state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    let token = cookies::session_token(&headers);
    let evidence = SessionEvidence::from_parts(token.as_deref(), query.next.as_deref());
    let decision = classify_callback(&evidence);

    tracing::debug!(decision = ?decision, "auth callback classified");
    redirect_for(&decision)
}

/// `GET /` — authoritative root classification.
///
/// One live lookup against the identity backend; cookie presence alone is
/// not trusted here. Lookup failures surface as an upstream error rather
/// than a misleading redirect.
pub async fn root(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Redirect> {
    let token = cookies::session_token(&headers);
    let decision = classify_root(state.sessions.as_ref(), token.as_deref()).await?;

    tracing::debug!(decision = ?decision, "root page classified");
    Ok(redirect_for(&decision))
}

/// Query parameters for the forward-auth guard endpoint.
#[derive(Debug, Deserialize)]
pub struct GuardQuery {
    pub path: String,
}

/// `GET /auth/guard?path=...` — forward-auth endpoint for the fronting proxy.
///
/// Answers 204 when the page may be served and a redirect otherwise, so the
/// proxy can apply the site-wide guard without duplicating its rules.
pub async fn route_guard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<GuardQuery>,
) -> Response {
    let token = cookies::session_token(&headers);
    let evidence = SessionEvidence::from_parts(token.as_deref(), None);

    match state.guard.decide(&query.path, &evidence) {
        RoutingDecision::Allow => StatusCode::NO_CONTENT.into_response(),
        decision => redirect_for(&decision).into_response(),
    }
}

// Classifier decisions reaching this point are always redirects; Allow is
// terminal in the guard path above and never produced by the classifiers.
fn redirect_for(decision: &RoutingDecision) -> Redirect {
    let target = decision
        .target_path()
        .unwrap_or(RoutingDecision::LOGIN_PATH);
    Redirect::temporary(target)
}
