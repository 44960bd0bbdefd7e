//! Serve a static directory to users who logged in with Google.
//!
//! `/login` starts the OAuth2 authorization-code flow, `/callback` finishes it
//! and hands out a `session_token` cookie, and every other path is served
//! from disk once that cookie is known to the in-memory [`SessionStore`].

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;

pub use config::{Cli, Config, ConfigError};
pub use error::{AuthError, AuthResult};
pub use routes::{build_router, AppState};
pub use session::SessionStore;
