//! Auth-related types and constants.

use serde::Deserialize;

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "session_token";

/// Number of access-token characters used as the session identifier.
pub const SESSION_ID_LEN: usize = 16;

/// Anti-forgery `state` sent with every login redirect. Constant, never verified.
pub const OAUTH_STATE: &str = "state";

/// Provider endpoints used during the authorization-code flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl ProviderEndpoints {
    pub const GOOGLE_AUTH_URL: &'static str = "https://accounts.google.com/o/oauth2/auth";
    pub const GOOGLE_TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";
    pub const GOOGLE_USERINFO_URL: &'static str = "https://www.googleapis.com/oauth2/v2/userinfo";

    pub fn google() -> Self {
        Self {
            auth_url: Self::GOOGLE_AUTH_URL.to_string(),
            token_url: Self::GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: Self::GOOGLE_USERINFO_URL.to_string(),
        }
    }
}

/// OAuth client credentials, built once at startup.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub scopes: Vec<String>,
    pub endpoints: ProviderEndpoints,
}

impl ProviderCredentials {
    /// Authorization URL the browser is sent to by `/login`.
    pub fn auth_code_url(&self, state: &str) -> String {
        let separator = if self.endpoints.auth_url.contains('?') {
            '&'
        } else {
            '?'
        };

        format!(
            "{}{}client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.endpoints.auth_url,
            separator,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_url),
            urlencoding::encode(&self.scopes.join(" ")),
            urlencoding::encode(state),
        )
    }
}

/// Successful response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Profile returned by the user-info endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub email: String,
}

/// Query parameters of the provider's redirect back to `/callback`.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}
