//! Credential selection and GraphQL data-backend client construction.
//!
//! The client is bound to exactly one authority at construction time: the
//! caller's bearer token, the administrative override secret, or nothing.
//! Endpoint configuration is validated here, not on first query, so a
//! misconfigured process fails at startup instead of misrouting every call.

#![deny(unsafe_code)]

use gateway_types::CredentialAuthority;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub const ENDPOINT_ENV_VAR: &str = "GRAPHQL_ENDPOINT";
pub const ADMIN_SECRET_ENV_VAR: &str = "GRAPHQL_ADMIN_SECRET";

/// Privileged header carrying the administrative override secret.
pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Data-backend connection settings.
///
/// Assembled once at process startup and injected wherever a client is
/// constructed; business logic never reads the environment itself.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// GraphQL endpoint URL. Required; client construction fails without it.
    #[serde(default)]
    pub endpoint: String,

    /// Administrative override secret for privileged, non-user-scoped access.
    #[serde(default)]
    pub admin_secret: Option<String>,
}

impl BackendConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            admin_secret: None,
        }
    }

    pub fn with_admin_secret(mut self, secret: impl Into<String>) -> Self {
        self.admin_secret = Some(secret.into());
        self
    }

    /// Read the configuration from the process environment.
    ///
    /// Used by the binary entrypoint only; everything downstream receives the
    /// config injected.
    pub fn from_env() -> Result<Self, ClientError> {
        let endpoint = std::env::var(ENDPOINT_ENV_VAR)
            .ok()
            .filter(|e| !e.is_empty())
            .ok_or(ClientError::MissingEndpoint)?;

        Ok(Self {
            endpoint,
            admin_secret: std::env::var(ADMIN_SECRET_ENV_VAR)
                .ok()
                .filter(|s| !s.is_empty()),
        })
    }
}

/// Choose which authority an outbound data-backend client authenticates as.
///
/// A caller token always wins, even when an admin secret is configured. The
/// admin override applies only when no token is available; with neither, the
/// call goes out unauthenticated and the backend decides whether to reject.
/// Pure: depends only on its two inputs.
pub fn select_authority(token: Option<&str>, admin_secret: Option<&str>) -> CredentialAuthority {
    match token {
        Some(token) if !token.is_empty() => CredentialAuthority::UserToken(token.to_string()),
        _ => match admin_secret {
            Some(secret) if !secret.is_empty() => CredentialAuthority::AdminOverride,
            _ => CredentialAuthority::Anonymous,
        },
    }
}

/// Errors constructing or using the data-backend client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Required endpoint configuration is absent. Fatal at construction.
    #[error("data backend endpoint is not configured (set {ENDPOINT_ENV_VAR})")]
    MissingEndpoint,

    /// Endpoint present but not a valid URL. Also fatal at construction.
    #[error("invalid data backend endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The selected credential could not be encoded as a header.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// Transport-level failure reaching the backend.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with GraphQL-level errors.
    #[error("backend returned errors: {0}")]
    Backend(String),
}

/// Client for the GraphQL data backend, bound to exactly one authority.
pub struct DataClient {
    http: reqwest::Client,
    endpoint: reqwest::Url,
    authority: CredentialAuthority,
}

impl std::fmt::Debug for DataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("authority", &self.authority)
            .finish()
    }
}

impl DataClient {
    /// Build a client bound to the given authority.
    ///
    /// Exactly one of the bearer credential, the admin-secret header, or no
    /// auth header at all ends up on the client.
    pub fn new(
        config: &BackendConfig,
        authority: CredentialAuthority,
    ) -> Result<Self, ClientError> {
        if config.endpoint.is_empty() {
            return Err(ClientError::MissingEndpoint);
        }

        let endpoint =
            reqwest::Url::parse(&config.endpoint).map_err(|e| ClientError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let mut headers = HeaderMap::new();
        match &authority {
            CredentialAuthority::UserToken(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| ClientError::InvalidCredential("bearer token".to_string()))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            CredentialAuthority::AdminOverride => {
                let secret = config.admin_secret.as_deref().ok_or_else(|| {
                    ClientError::InvalidCredential(
                        "admin override selected without a configured secret".to_string(),
                    )
                })?;
                let mut value = HeaderValue::from_str(secret)
                    .map_err(|_| ClientError::InvalidCredential("admin secret".to_string()))?;
                value.set_sensitive(true);
                headers.insert(ADMIN_SECRET_HEADER, value);
            }
            CredentialAuthority::Anonymous => {}
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        tracing::debug!(
            endpoint = %endpoint,
            authority = authority.kind(),
            "constructed data backend client"
        );

        Ok(Self {
            http,
            endpoint,
            authority,
        })
    }

    /// Convenience constructor: select the authority from the caller token
    /// and the configured admin secret, then build the client.
    pub fn for_request(config: &BackendConfig, token: Option<&str>) -> Result<Self, ClientError> {
        let authority = select_authority(token, config.admin_secret.as_deref());
        Self::new(config, authority)
    }

    pub fn authority(&self) -> &CredentialAuthority {
        &self.authority
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Execute a GraphQL operation and return its `data` payload.
    ///
    /// HTTP-level failures and GraphQL-level `errors` surface as distinct
    /// [`ClientError`] variants.
    pub async fn execute(&self, query: &str, variables: Value) -> Result<Value, ClientError> {
        let body = json!({ "query": query, "variables": variables });

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;

        if let Some(errors) = payload.get("errors") {
            let has_errors = errors.as_array().map_or(true, |a| !a.is_empty());
            if has_errors {
                return Err(ClientError::Backend(errors.to_string()));
            }
        }

        Ok(payload.get("data").cloned().unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BackendConfig {
        BackendConfig::new("http://localhost:8080/v1/graphql").with_admin_secret("s3cret")
    }

    #[test]
    fn test_token_wins_over_admin_secret() {
        let authority = select_authority(Some("abc123"), Some("s3cret"));
        assert_eq!(authority, CredentialAuthority::UserToken("abc123".to_string()));
    }

    #[test]
    fn test_admin_secret_when_no_token() {
        assert_eq!(
            select_authority(None, Some("s3cret")),
            CredentialAuthority::AdminOverride
        );
        assert_eq!(
            select_authority(Some(""), Some("s3cret")),
            CredentialAuthority::AdminOverride
        );
    }

    #[test]
    fn test_anonymous_when_neither() {
        assert_eq!(select_authority(None, None), CredentialAuthority::Anonymous);
        assert_eq!(
            select_authority(Some(""), Some("")),
            CredentialAuthority::Anonymous
        );
    }

    #[test]
    fn test_missing_endpoint_fails_fast() {
        let err = DataClient::new(&BackendConfig::default(), CredentialAuthority::Anonymous)
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingEndpoint));
    }

    #[test]
    fn test_invalid_endpoint_fails_fast() {
        let bad = BackendConfig::new("not a url");
        let err = DataClient::new(&bad, CredentialAuthority::Anonymous).unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_admin_override_requires_configured_secret() {
        let no_secret = BackendConfig::new("http://localhost:8080/v1/graphql");
        let err = DataClient::new(&no_secret, CredentialAuthority::AdminOverride).unwrap_err();
        assert!(matches!(err, ClientError::InvalidCredential(_)));
    }

    #[test]
    fn test_for_request_binds_user_token() {
        let client = DataClient::for_request(&config(), Some("abc123")).unwrap();
        assert_eq!(
            client.authority(),
            &CredentialAuthority::UserToken("abc123".to_string())
        );
    }

    #[test]
    fn test_for_request_falls_back_to_admin() {
        let client = DataClient::for_request(&config(), None).unwrap();
        assert_eq!(client.authority(), &CredentialAuthority::AdminOverride);
    }
}
