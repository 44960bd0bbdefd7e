//! OAuth2 identity provider client.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{AuthError, AuthResult};

use super::types::{ProviderCredentials, TokenResponse, UserProfile};

/// The provider-facing half of the authorization-code flow.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is redirected to in order to log in.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for an access token.
    async fn exchange_code(&self, code: &str) -> AuthResult<TokenResponse>;

    /// Fetch the profile of the user owning `access_token`.
    async fn fetch_profile(&self, access_token: &str) -> AuthResult<UserProfile>;
}

/// Google OAuth2 over plain HTTPS calls.
pub struct GoogleProvider {
    client: reqwest::Client,
    credentials: ProviderCredentials,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'a str,
}

impl GoogleProvider {
    pub fn new(credentials: ProviderCredentials) -> Self {
        Self::with_client(reqwest::Client::new(), credentials)
    }

    pub fn with_client(client: reqwest::Client, credentials: ProviderCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    pub fn credentials(&self) -> &ProviderCredentials {
        &self.credentials
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn authorize_url(&self, state: &str) -> String {
        self.credentials.auth_code_url(state)
    }

    async fn exchange_code(&self, code: &str) -> AuthResult<TokenResponse> {
        let response = self
            .client
            .post(&self.credentials.endpoints.token_url)
            .form(&TokenRequest {
                code,
                client_id: &self.credentials.client_id,
                client_secret: &self.credentials.client_secret,
                redirect_uri: &self.credentials.redirect_url,
                grant_type: "authorization_code",
            })
            .send()
            .await
            .map_err(|e| AuthError::exchange(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::exchange(format!("{} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::exchange(format!("invalid token response: {}", e)))
    }

    async fn fetch_profile(&self, access_token: &str) -> AuthResult<UserProfile> {
        let response = self
            .client
            .get(&self.credentials.endpoints.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::profile_fetch(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::profile_fetch(format!("{} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::profile_fetch(format!("invalid user info response: {}", e)))
    }
}
