//! Cookie header parsing.

use axum::http::{header::COOKIE, HeaderMap};

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "token";

/// Extract the session token from the request's cookie headers.
///
/// The value is treated as opaque; empty values count as absent.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_extracts_token() {
        assert_eq!(
            session_token(&headers("token=abc123")),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extracts_among_other_cookies() {
        assert_eq!(
            session_token(&headers("theme=dark; token=abc123; lang=pt-BR")),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_empty_value_is_absent() {
        assert_eq!(session_token(&headers("token=")), None);
    }

    #[test]
    fn test_missing_cookie_is_absent() {
        assert_eq!(session_token(&headers("theme=dark")), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_value_may_contain_equals() {
        assert_eq!(
            session_token(&headers("token=abc==")),
            Some("abc==".to_string())
        );
    }
}
