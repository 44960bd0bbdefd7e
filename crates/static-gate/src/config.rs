//! Startup configuration.
//!
//! Every setting can be given as a flag or through its environment variable.
//! A `.env` file is loaded by `main` before parsing.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::auth::types::{ProviderCredentials, ProviderEndpoints};

/// Callback URL registered with Google. Deliberately not derived from the port.
pub const REDIRECT_URL: &str = "http://localhost:8080/callback";

pub const DEFAULT_SERVE_DIR: &str = "static";

pub const DEFAULT_PORT: u16 = 8080;

/// Scope needed to read the user's email address.
pub const USERINFO_EMAIL_SCOPE: &str = "https://www.googleapis.com/auth/userinfo.email";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    MissingVar(&'static str),

    #[error("SERVER_PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Parser)]
#[command(name = "static-gate")]
#[command(about = "Serve a static directory behind Google OAuth2 login")]
pub struct Cli {
    /// Google OAuth client ID.
    #[arg(long, env = "GOOGLE_CLIENT_ID", hide_env_values = true)]
    pub google_client_id: Option<String>,

    /// Google OAuth client secret.
    #[arg(long, env = "GOOGLE_CLIENT_SECRET", hide_env_values = true)]
    pub google_client_secret: Option<String>,

    /// Directory whose files are served to authenticated users [default: static].
    #[arg(long, env = "SERVE_DIR")]
    pub serve_dir: Option<String>,

    /// Port to listen on [default: 8080].
    #[arg(long, env = "SERVER_PORT")]
    pub port: Option<String>,

    #[arg(long, env = "OAUTH_AUTH_URL", hide = true, default_value = ProviderEndpoints::GOOGLE_AUTH_URL)]
    pub auth_url: String,

    #[arg(long, env = "OAUTH_TOKEN_URL", hide = true, default_value = ProviderEndpoints::GOOGLE_TOKEN_URL)]
    pub token_url: String,

    #[arg(long, env = "OAUTH_USERINFO_URL", hide = true, default_value = ProviderEndpoints::GOOGLE_USERINFO_URL)]
    pub userinfo_url: String,
}

/// Validated configuration, immutable after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub serve_dir: PathBuf,
    pub port: u16,
    pub credentials: ProviderCredentials,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let client_id = required(cli.google_client_id, "GOOGLE_CLIENT_ID")?;
        let client_secret = required(cli.google_client_secret, "GOOGLE_CLIENT_SECRET")?;

        let serve_dir = optional(cli.serve_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVE_DIR));

        let port = match optional(cli.port) {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            serve_dir,
            port,
            credentials: ProviderCredentials {
                client_id,
                client_secret,
                redirect_url: REDIRECT_URL.to_string(),
                scopes: vec![USERINFO_EMAIL_SCOPE.to_string()],
                endpoints: ProviderEndpoints {
                    auth_url: cli.auth_url,
                    token_url: cli.token_url,
                    userinfo_url: cli.userinfo_url,
                },
            },
        })
    }
}

/// Empty values count as unset.
fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    optional(value).ok_or(ConfigError::MissingVar(name))
}
