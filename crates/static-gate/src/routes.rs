//! Router wiring.

use axum::{middleware, routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower::Layer;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::auth::{self, IdentityProvider};
use crate::session::SessionStore;

/// State shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub provider: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Fresh state with an empty session store.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            provider,
        }
    }
}

/// Build the application router.
///
/// `/login` and `/callback` are open. Every other path falls through to the
/// static directory, behind the session gate.
pub fn build_router(state: AppState, serve_dir: impl AsRef<Path>) -> Router {
    let files = middleware::from_fn_with_state(state.clone(), auth::require_session)
        .layer(ServeDir::new(serve_dir));

    Router::new()
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .fallback_service(files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
