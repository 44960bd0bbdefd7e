//! Errors raised while completing a login.
//!
//! Every variant is answered with an opaque `500`; the cause only reaches the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider rejected the authorization code, or the exchange call failed.
    #[error("Token exchange failed: {0}")]
    Exchange(String),

    /// The user-info call failed or its body could not be decoded.
    #[error("Profile fetch failed: {0}")]
    ProfileFetch(String),

    /// The access token is too short to derive a session identifier from.
    #[error("Access token has {len} characters, need at least {min}")]
    ShortToken { len: usize, min: usize },
}

impl AuthError {
    pub fn exchange(message: impl Into<String>) -> Self {
        AuthError::Exchange(message.into())
    }

    pub fn profile_fetch(message: impl Into<String>) -> Self {
        AuthError::ProfileFetch(message.into())
    }

    fn public_message(&self) -> &'static str {
        match self {
            AuthError::Exchange(_) => "Failed to exchange token",
            AuthError::ProfileFetch(_) => "Failed to get user info",
            AuthError::ShortToken { .. } => "Failed to create session",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::error!("Auth callback error: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.public_message()).into_response()
    }
}

/// Result type alias for the login flow
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_is_internal_error() {
        let errors = [
            AuthError::exchange("invalid_grant"),
            AuthError::profile_fetch("connection reset"),
            AuthError::ShortToken { len: 3, min: 16 },
        ];

        for err in errors {
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn test_body_hides_cause() {
        let response = AuthError::exchange("client_secret=hunter2 rejected").into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        assert_eq!(&body[..], b"Failed to exchange token");
    }

    #[test]
    fn test_short_token_message() {
        let err = AuthError::ShortToken { len: 5, min: 16 };
        assert_eq!(err.to_string(), "Access token has 5 characters, need at least 16");
    }
}
