//! Admin authentication endpoints.

use axum::extract::State;
use axum::Json;
use orghub_auth::service::LoginInput;
use surrealdb::Connection;
use validator::Validate;

use crate::error::ApiError;
use crate::extractors::CurrentAdmin;
use crate::models::{LoginRequest, MeResponse, TokenResponse};
use crate::state::AppState;

/// POST /admin/login
pub async fn login<C: Connection>(
    State(state): State<AppState<C>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    request.validate()?;

    let output = state
        .auth
        .login(LoginInput {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        access_token: output.access_token,
        token_type: output.token_type,
        expires_in: output.expires_in,
    }))
}

/// GET /admin/me — echo the verified token claims.
pub async fn me<C: Connection>(
    State(_state): State<AppState<C>>,
    admin: CurrentAdmin,
) -> Json<MeResponse> {
    Json(MeResponse {
        admin_id: admin.claims.sub,
        email: admin.claims.email,
        organization_id: admin.claims.org_id,
        exp: admin.claims.exp,
    })
}
