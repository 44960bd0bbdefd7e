//! Login and callback handlers.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::error::{AuthError, AuthResult};
use crate::routes::AppState;

use super::middleware::{build_session_cookie, derive_session_id};
use super::types::{CallbackParams, OAUTH_STATE};

/// Send the browser to the provider's consent screen.
pub async fn login(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&state.provider.authorize_url(OAUTH_STATE))
}

/// Handle the provider's redirect back after login.
///
/// Exchanges the code, fetches the profile, records a session and sets the
/// session cookie. Any failure leaves the store untouched.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    match handle_callback_inner(&state, params).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}

async fn handle_callback_inner(state: &AppState, params: CallbackParams) -> AuthResult<Response> {
    if let Some(error) = params.error.as_deref() {
        tracing::warn!("Provider returned an error on callback: {}", error);
        return Err(AuthError::exchange(format!("provider error: {}", error)));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AuthError::exchange("missing authorization code"))?;

    let tokens = state.provider.exchange_code(&code).await?;
    tracing::debug!(
        "Token exchange succeeded (type: {:?}, expires in: {:?}s)",
        tokens.token_type,
        tokens.expires_in
    );

    // The email is only logged; any Google account gets in.
    let profile = state.provider.fetch_profile(&tokens.access_token).await?;

    let session_id = derive_session_id(&tokens.access_token)?;
    state.sessions.create(session_id.as_str());

    tracing::info!("Successful login for: {}", profile.email);

    let cookie = build_session_cookie(&session_id);
    Ok((
        StatusCode::TEMPORARY_REDIRECT,
        [
            (header::LOCATION, "/"),
            (header::SET_COOKIE, cookie.as_str()),
        ],
    )
        .into_response())
}
