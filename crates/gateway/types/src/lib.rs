//! Shared types for the academy access gateway.
//!
//! Session evidence, routing decisions and credential authorities are the
//! vocabulary every other gateway crate speaks. They carry no behavior of
//! their own beyond construction-time normalization.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Evidence about the caller's session, derived fresh on every request.
///
/// Evidence is immutable for the duration of one classification and is never
/// cached across requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvidence {
    /// A session-token cookie was present with a non-empty value.
    ///
    /// The token itself is opaque; presence is a proxy for "is authenticated".
    /// Cryptographic validity is the identity backend's concern.
    pub has_valid_token: bool,

    /// Caller-supplied post-auth destination (the `next` query parameter).
    pub explicit_target: Option<String>,
}

impl SessionEvidence {
    /// Build evidence from the raw cookie value and `next` parameter.
    ///
    /// Empty strings normalize to absent, so downstream classification only
    /// ever distinguishes present from absent.
    pub fn from_parts(token: Option<&str>, next: Option<&str>) -> Self {
        Self {
            has_valid_token: token.is_some_and(|t| !t.is_empty()),
            explicit_target: next.filter(|n| !n.is_empty()).map(str::to_owned),
        }
    }

    /// Evidence for a request carrying neither cookie nor explicit target.
    pub fn anonymous() -> Self {
        Self {
            has_valid_token: false,
            explicit_target: None,
        }
    }
}

/// Where an inbound request must be routed.
///
/// Exactly one variant is produced per evaluation; no request falls through
/// without a decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Serve the requested page.
    Allow,
    /// Redirect to an explicit caller-supplied path.
    RedirectTo(String),
    /// Redirect to the login page.
    RedirectToLogin,
    /// Redirect to the dashboard.
    RedirectToDashboard,
}

impl RoutingDecision {
    pub const LOGIN_PATH: &'static str = "/login";
    pub const DASHBOARD_PATH: &'static str = "/dashboard";

    /// The redirect target for this decision, or `None` for [`Allow`].
    ///
    /// [`Allow`]: RoutingDecision::Allow
    pub fn target_path(&self) -> Option<&str> {
        match self {
            RoutingDecision::Allow => None,
            RoutingDecision::RedirectTo(path) => Some(path),
            RoutingDecision::RedirectToLogin => Some(Self::LOGIN_PATH),
            RoutingDecision::RedirectToDashboard => Some(Self::DASHBOARD_PATH),
        }
    }

    pub fn is_redirect(&self) -> bool {
        !matches!(self, RoutingDecision::Allow)
    }
}

/// Which authority an outbound data-backend client authenticates as.
///
/// Selected once per client construction; never persisted or reused across
/// requests with different evidence.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialAuthority {
    /// End-user identity: the session token travels as a bearer credential.
    UserToken(String),
    /// Administrative override: the configured secret travels as a
    /// privileged header.
    AdminOverride,
    /// No credential at all. The backend decides whether to reject the call.
    Anonymous,
}

impl CredentialAuthority {
    /// Short name for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            CredentialAuthority::UserToken(_) => "user-token",
            CredentialAuthority::AdminOverride => "admin-override",
            CredentialAuthority::Anonymous => "anonymous",
        }
    }
}

// Token values stay out of debug output.
impl std::fmt::Debug for CredentialAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialAuthority::UserToken(_) => f.write_str("UserToken(..)"),
            CredentialAuthority::AdminOverride => f.write_str("AdminOverride"),
            CredentialAuthority::Anonymous => f.write_str("Anonymous"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_normalizes_empty_values() {
        let evidence = SessionEvidence::from_parts(Some(""), Some(""));
        assert!(!evidence.has_valid_token);
        assert_eq!(evidence.explicit_target, None);

        let evidence = SessionEvidence::from_parts(Some("abc123"), Some("/perfil"));
        assert!(evidence.has_valid_token);
        assert_eq!(evidence.explicit_target.as_deref(), Some("/perfil"));
    }

    #[test]
    fn test_evidence_absent_inputs() {
        let evidence = SessionEvidence::from_parts(None, None);
        assert_eq!(evidence, SessionEvidence::anonymous());
    }

    #[test]
    fn test_target_path() {
        assert_eq!(RoutingDecision::Allow.target_path(), None);
        assert_eq!(
            RoutingDecision::RedirectTo("/perfil".to_string()).target_path(),
            Some("/perfil")
        );
        assert_eq!(RoutingDecision::RedirectToLogin.target_path(), Some("/login"));
        assert_eq!(
            RoutingDecision::RedirectToDashboard.target_path(),
            Some("/dashboard")
        );
    }

    #[test]
    fn test_authority_debug_redacts_token() {
        let authority = CredentialAuthority::UserToken("secret-token".to_string());
        let rendered = format!("{:?}", authority);
        assert!(!rendered.contains("secret-token"));
    }
}
