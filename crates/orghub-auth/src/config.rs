//! Authentication configuration.

/// Configuration for token issuance and validation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for HS256 JWT signing and verification.
    pub jwt_secret: String,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Access token lifetime in seconds (default: 1800 = 30 minutes).
    pub token_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: "orghub".into(),
            token_lifetime_secs: 1800,
        }
    }
}
