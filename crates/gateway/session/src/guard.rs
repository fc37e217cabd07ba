//! Site-wide route guard.
//!
//! Applied in front of every page request, before any page logic runs. The
//! guard only looks at the path and the session evidence; it never validates
//! the token itself.

use gateway_types::{RoutingDecision, SessionEvidence};

/// Routes reachable without a session.
pub const DEFAULT_PUBLIC_ROUTES: &[&str] =
    &["/login", "/register", "/auth/callback", "/forgot-password"];

/// Per-path access guard.
#[derive(Clone, Debug)]
pub struct RouteGuard {
    public_routes: Vec<String>,
    dev_mode: bool,
}

impl RouteGuard {
    pub fn new(public_routes: Vec<String>, dev_mode: bool) -> Self {
        Self {
            public_routes,
            dev_mode,
        }
    }

    /// Guard with the default public route set and dev mode off.
    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_PUBLIC_ROUTES.iter().map(|r| r.to_string()).collect(),
            false,
        )
    }

    fn is_public(&self, path: &str) -> bool {
        self.public_routes.iter().any(|r| r == path)
    }

    /// Decide whether `path` may be served with the given evidence.
    ///
    /// Dev mode grants free access, with login and root still landing on the
    /// dashboard. Otherwise: unauthenticated requests to non-public paths go
    /// to login, authenticated requests to login/register/root go to the
    /// dashboard, and everything else is allowed through.
    pub fn decide(&self, path: &str, evidence: &SessionEvidence) -> RoutingDecision {
        if self.dev_mode {
            if path == "/login" || path == "/" {
                return RoutingDecision::RedirectToDashboard;
            }
            return RoutingDecision::Allow;
        }

        let authenticated = evidence.has_valid_token;

        if !authenticated && !self.is_public(path) && path != "/" {
            tracing::debug!(path = %path, "unauthenticated request to guarded path");
            return RoutingDecision::RedirectToLogin;
        }

        if authenticated && (path == "/login" || path == "/register" || path == "/") {
            return RoutingDecision::RedirectToDashboard;
        }

        if !authenticated && path == "/" {
            return RoutingDecision::RedirectToLogin;
        }

        RoutingDecision::Allow
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticated() -> SessionEvidence {
        SessionEvidence::from_parts(Some("abc123"), None)
    }

    fn anonymous() -> SessionEvidence {
        SessionEvidence::anonymous()
    }

    #[test]
    fn test_guarded_path_requires_token() {
        let guard = RouteGuard::with_defaults();
        assert_eq!(
            guard.decide("/alunos", &anonymous()),
            RoutingDecision::RedirectToLogin
        );
        assert_eq!(guard.decide("/alunos", &authenticated()), RoutingDecision::Allow);
    }

    #[test]
    fn test_public_routes_stay_reachable() {
        let guard = RouteGuard::with_defaults();
        for route in DEFAULT_PUBLIC_ROUTES {
            assert_eq!(
                guard.decide(route, &anonymous()),
                RoutingDecision::Allow,
                "route {route} should be public"
            );
        }
    }

    #[test]
    fn test_authenticated_login_goes_to_dashboard() {
        let guard = RouteGuard::with_defaults();
        assert_eq!(
            guard.decide("/login", &authenticated()),
            RoutingDecision::RedirectToDashboard
        );
        assert_eq!(
            guard.decide("/register", &authenticated()),
            RoutingDecision::RedirectToDashboard
        );
    }

    #[test]
    fn test_root_redirects_by_auth_state() {
        let guard = RouteGuard::with_defaults();
        assert_eq!(
            guard.decide("/", &authenticated()),
            RoutingDecision::RedirectToDashboard
        );
        assert_eq!(guard.decide("/", &anonymous()), RoutingDecision::RedirectToLogin);
    }

    #[test]
    fn test_dev_mode_bypasses_guard() {
        let guard = RouteGuard::new(vec![], true);
        assert_eq!(guard.decide("/alunos", &anonymous()), RoutingDecision::Allow);
        assert_eq!(
            guard.decide("/login", &anonymous()),
            RoutingDecision::RedirectToDashboard
        );
        assert_eq!(
            guard.decide("/", &anonymous()),
            RoutingDecision::RedirectToDashboard
        );
    }
}
