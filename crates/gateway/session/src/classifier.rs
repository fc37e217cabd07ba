//! Cookie-presence classifier for the auth callback.

use gateway_types::{RoutingDecision, SessionEvidence};

/// Decide where the auth callback routes a request.
///
/// Priority order, first match wins:
/// 1. an explicit `next` target is honored unconditionally, even over the
///    authenticated/unauthenticated fallback;
/// 2. a non-empty session-token cookie routes to the dashboard;
/// 3. everything else routes to login.
///
/// The explicit target is honored as-is, absolute URLs included; same-origin
/// enforcement is left to the fronting proxy. Callers that cannot rely on a
/// proxy stripping cross-origin targets should validate `next` before
/// building the evidence.
///
/// This is a transport-layer convenience redirect, not an authorization gate:
/// no token validation happens here, and every combination of evidence yields
/// exactly one decision.
pub fn classify_callback(evidence: &SessionEvidence) -> RoutingDecision {
    if let Some(target) = &evidence.explicit_target {
        tracing::debug!(target = %target, "honoring explicit redirect target");
        return RoutingDecision::RedirectTo(target.clone());
    }

    if evidence.has_valid_token {
        return RoutingDecision::RedirectToDashboard;
    }

    RoutingDecision::RedirectToLogin
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence(token: Option<&str>, next: Option<&str>) -> SessionEvidence {
        SessionEvidence::from_parts(token, next)
    }

    #[test]
    fn test_explicit_target_wins_over_auth_state() {
        // Even a valid-looking session cookie does not override `next`.
        let decision = classify_callback(&evidence(Some("abc123"), Some("/perfil")));
        assert_eq!(decision, RoutingDecision::RedirectTo("/perfil".to_string()));

        let decision = classify_callback(&evidence(None, Some("/perfil")));
        assert_eq!(decision, RoutingDecision::RedirectTo("/perfil".to_string()));
    }

    #[test]
    fn test_token_without_target_goes_to_dashboard() {
        let decision = classify_callback(&evidence(Some("abc123"), None));
        assert_eq!(decision, RoutingDecision::RedirectToDashboard);
    }

    #[test]
    fn test_no_evidence_goes_to_login() {
        let decision = classify_callback(&evidence(None, None));
        assert_eq!(decision, RoutingDecision::RedirectToLogin);
    }

    #[test]
    fn test_empty_values_count_as_absent() {
        let decision = classify_callback(&evidence(Some(""), Some("")));
        assert_eq!(decision, RoutingDecision::RedirectToLogin);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let evidence = evidence(Some("abc123"), Some("/turmas"));
        assert_eq!(classify_callback(&evidence), classify_callback(&evidence));
    }
}
