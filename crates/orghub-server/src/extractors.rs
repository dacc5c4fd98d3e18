//! Axum extractors for authenticated routes.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use orghub_auth::token;
use orghub_auth::AccessTokenClaims;
use surrealdb::Connection;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated administrator, extracted from a bearer token.
///
/// Token verification is stateless — no database lookup happens here.
/// A missing `Authorization` header (or a non-bearer scheme) is
/// "no credentials"; a bearer token that fails verification is
/// "invalid token". The two are distinct responses.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub admin_id: Uuid,
    pub claims: AccessTokenClaims,
}

#[async_trait]
impl<C: Connection> FromRequestParts<AppState<C>> for CurrentAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<C>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingCredentials)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(ApiError::MissingCredentials)?;

        let claims = token::validate_access_token(token, &state.auth_config)
            .map_err(|_| ApiError::InvalidToken)?
            .0;

        let admin_id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::InvalidToken)?;

        Ok(CurrentAdmin { admin_id, claims })
    }
}
