//! HTTP session lookup against the identity backend.

use async_trait::async_trait;
use gateway_session::{SessionLookup, SessionLookupError};

use crate::error::GatewayError;

/// Session lookup that asks the identity backend whether the presented
/// token maps to an active session.
///
/// Only presence or absence is reported; the session object itself is never
/// inspected. Timeout and retry policy live in the HTTP client configuration,
/// not here.
pub struct HttpSessionLookup {
    http: reqwest::Client,
    session_url: reqwest::Url,
}

impl HttpSessionLookup {
    pub fn new(session_url: &str) -> Result<Self, GatewayError> {
        let session_url = reqwest::Url::parse(session_url).map_err(|e| {
            GatewayError::Config(format!("invalid identity session URL {session_url:?}: {e}"))
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            session_url,
        })
    }
}

#[async_trait]
impl SessionLookup for HttpSessionLookup {
    async fn has_active_session(
        &self,
        token: Option<&str>,
    ) -> Result<bool, SessionLookupError> {
        // No token cookie means the identity backend cannot have a session
        // for this caller; skip the round trip.
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Ok(false);
        };

        let response = self
            .http
            .get(self.session_url.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SessionLookupError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(false);
        }

        if !status.is_success() {
            return Err(SessionLookupError(format!(
                "identity backend answered {status}"
            )));
        }

        Ok(true)
    }
}
