//! Authentication error types.

use orghub_core::error::OrgError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for OrgError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => OrgError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => OrgError::Crypto(msg),
        }
    }
}
