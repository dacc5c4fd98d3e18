//! Application configuration loaded from environment variables.
//!
//! Fail-fast: required variables must be present and valid, or the
//! application exits with a clear error message before touching the
//! database.

use std::env;

use orghub_auth::AuthConfig;
use orghub_db::DbConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Root server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP listener.
    pub host: String,
    /// Bind port for the HTTP listener.
    pub port: u16,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

fn var(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn var_or(name: &'static str, default: &str) -> String {
    var(name).unwrap_or_else(|| default.to_string())
}

fn parsed_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid(name, e.to_string())),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `ORGHUB_JWT_SECRET` is required; everything else has a
    /// development default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            var("ORGHUB_JWT_SECRET").ok_or(ConfigError::Missing("ORGHUB_JWT_SECRET"))?;

        let token_lifetime_mins: u64 = parsed_var("ORGHUB_TOKEN_LIFETIME_MINS", 30)?;

        Ok(Self {
            host: var_or("ORGHUB_HOST", "0.0.0.0"),
            port: parsed_var("ORGHUB_PORT", 8080)?,
            db: DbConfig {
                url: var_or("ORGHUB_DB_URL", "127.0.0.1:8000"),
                namespace: var_or("ORGHUB_DB_NAMESPACE", "orghub"),
                database: var_or("ORGHUB_DB_NAME", "main"),
                username: var_or("ORGHUB_DB_USER", "root"),
                password: var_or("ORGHUB_DB_PASSWORD", "root"),
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_issuer: var_or("ORGHUB_JWT_ISSUER", "orghub"),
                token_lifetime_secs: token_lifetime_mins * 60,
            },
        })
    }
}
