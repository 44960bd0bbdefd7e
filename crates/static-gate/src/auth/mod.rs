//! Google OAuth login and session gating.
//!
//! This module provides:
//! - The `/login` redirect and `/callback` code exchange
//! - `require_session` middleware for protecting routes
//! - An `IdentityProvider` seam with a Google implementation

mod handlers;
mod middleware;
pub mod provider;
pub mod types;

pub use handlers::{callback, login};
pub use middleware::{
    build_session_cookie, derive_session_id, extract_session_cookie, require_session,
};
pub use provider::{GoogleProvider, IdentityProvider};
