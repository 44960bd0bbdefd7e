//! Session gate for protected routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use cookie::Cookie;

use crate::error::{AuthError, AuthResult};
use crate::routes::AppState;

use super::types::{SESSION_COOKIE, SESSION_ID_LEN};

/// Middleware that lets a request through only with a known session cookie.
///
/// Use with `axum::middleware::from_fn_with_state`. Anything else is sent to
/// `/login` with a 307 and the inner service is never called.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authenticated = extract_session_cookie(request.headers())
        .is_some_and(|id| state.sessions.is_valid(&id));

    if !authenticated {
        tracing::debug!("Unauthenticated request to {}, redirecting to login", request.uri());
        return Redirect::temporary("/login").into_response();
    }

    next.run(request).await
}

/// Value of the session cookie, if the request carries one.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(cookie_header) = value.to_str() else {
            continue;
        };

        for cookie_str in cookie_header.split(';') {
            if let Ok(cookie) = Cookie::parse(cookie_str.trim()) {
                if cookie.name() == SESSION_COOKIE {
                    return Some(cookie.value().to_string());
                }
            }
        }
    }

    None
}

/// Build the `Set-Cookie` value for a new session.
pub fn build_session_cookie(session_id: &str) -> String {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .build()
        .to_string()
}

/// Session identifier for an access token: its first `SESSION_ID_LEN` characters.
///
/// Tokens shorter than that are refused rather than used whole.
pub fn derive_session_id(access_token: &str) -> AuthResult<String> {
    let len = access_token.chars().count();
    if len < SESSION_ID_LEN {
        return Err(AuthError::ShortToken {
            len,
            min: SESSION_ID_LEN,
        });
    }

    Ok(access_token.chars().take(SESSION_ID_LEN).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_derive_session_id_takes_prefix() {
        let id = derive_session_id("abcdEFGH12345678morebytes").unwrap();
        assert_eq!(id, "abcdEFGH12345678");
    }

    #[test]
    fn test_derive_session_id_exact_length() {
        let id = derive_session_id("abcdEFGH12345678").unwrap();
        assert_eq!(id, "abcdEFGH12345678");
    }

    #[test]
    fn test_derive_session_id_short_token() {
        let err = derive_session_id("short").unwrap_err();
        assert!(matches!(err, AuthError::ShortToken { len: 5, min: 16 }));

        let err = derive_session_id("").unwrap_err();
        assert!(matches!(err, AuthError::ShortToken { len: 0, .. }));
    }

    #[test]
    fn test_derive_session_id_counts_characters() {
        // 16 characters, more than 16 bytes.
        let token = "ééééééééééééééééxyz";
        let id = derive_session_id(token).unwrap();
        assert_eq!(id.chars().count(), 16);
        assert_eq!(id, "éééééééééééééééé");
    }

    #[test]
    fn test_extract_session_cookie() {
        let headers = headers_with_cookie("theme=dark; session_token=abcdEFGH12345678; lang=en");
        assert_eq!(
            extract_session_cookie(&headers).as_deref(),
            Some("abcdEFGH12345678")
        );
    }

    #[test]
    fn test_extract_session_cookie_missing() {
        assert!(extract_session_cookie(&HeaderMap::new()).is_none());

        let headers = headers_with_cookie("theme=dark; session=abc");
        assert!(extract_session_cookie(&headers).is_none());
    }

    #[test]
    fn test_extract_session_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("session_token=xyz"));

        assert_eq!(extract_session_cookie(&headers).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_build_session_cookie() {
        let cookie = build_session_cookie("abcdEFGH12345678");
        let parsed = Cookie::parse(cookie.as_str()).unwrap();

        assert_eq!(parsed.name(), "session_token");
        assert_eq!(parsed.value(), "abcdEFGH12345678");
        assert_eq!(parsed.path(), Some("/"));
        assert_eq!(parsed.http_only(), Some(true));
    }
}
