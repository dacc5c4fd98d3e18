//! JWT access token issuance and verification.
//!
//! Tokens are self-contained HS256-signed credentials binding an
//! administrator to one organization. Nothing is persisted and no
//! revocation exists — expiry is the only termination mechanism.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject — admin ID (UUID string).
    pub sub: String,
    /// Admin login email.
    pub email: String,
    /// Organization ID (UUID string).
    pub org_id: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed HS256 JWT access token.
pub fn issue_access_token(
    admin_id: Uuid,
    email: &str,
    org_id: Uuid,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        sub: admin_id.to_string(),
        email: email.to_string(),
        org_id: org_id.to_string(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.token_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    let header = Header::new(Algorithm::HS256);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify an HS256 JWT access token.
///
/// Expiry is checked with zero leeway: a token is rejected the moment
/// `exp` passes (the jsonwebtoken default of 60 seconds is
/// deliberately overridden).
pub fn decode_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Validated JWT claims — a newtype proving the token was verified.
///
/// Used by the API layer to extract authenticated context from
/// incoming requests.
#[derive(Debug, Clone)]
pub struct ValidatedClaims(pub AccessTokenClaims);

/// Validate a JWT access token (signature, expiry, issuer) and return
/// the verified claims.
///
/// This is the entry point for request-level authentication. It is
/// purely stateless — no database lookup is performed.
pub fn validate_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<ValidatedClaims, AuthError> {
    decode_access_token(token, config).map(ValidatedClaims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-not-for-production".into(),
            jwt_issuer: "orghub-test".into(),
            token_lifetime_secs: 1800,
        }
    }

    #[test]
    fn jwt_roundtrip() {
        let config = test_config();
        let admin_id = Uuid::new_v4();
        let org_id = Uuid::new_v4();

        let token =
            issue_access_token(admin_id, "admin@example.com", org_id, &config).unwrap();
        let claims = decode_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, admin_id.to_string());
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.org_id, org_id.to_string());
        assert_eq!(claims.iss, "orghub-test");
        assert_eq!(claims.exp - claims.iat, 1800);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();

        // Hand-craft a token whose expiry is already in the past.
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: Uuid::new_v4().to_string(),
            email: "admin@example.com".into(),
            org_id: Uuid::new_v4().to_string(),
            iss: config.jwt_issuer.clone(),
            iat: now - 120,
            exp: now - 60,
        };
        let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let token =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

        let err = decode_access_token(&token, &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let config = test_config();
        let token =
            issue_access_token(Uuid::new_v4(), "a@x.com", Uuid::new_v4(), &config).unwrap();

        let wrong = AuthConfig {
            jwt_secret: "a-different-secret".into(),
            ..test_config()
        };
        let err = decode_access_token(&token, &wrong).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let config = test_config();
        let token =
            issue_access_token(Uuid::new_v4(), "a@x.com", Uuid::new_v4(), &config).unwrap();

        let other = AuthConfig {
            jwt_issuer: "someone-else".into(),
            ..test_config()
        };
        let err = decode_access_token(&token, &other).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = decode_access_token("not-a-jwt", &test_config()).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }
}
