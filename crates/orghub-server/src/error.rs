//! HTTP error types and status mapping.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use orghub_core::OrgError;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input, rejected before any store access.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness violation (duplicate organization / admin email).
    #[error("{0}")]
    Conflict(String),

    /// Update/delete precondition failed without a more specific
    /// classification.
    #[error("{0}")]
    OperationFailed(String),

    #[error("{0}")]
    NotFound(String),

    /// Login failure.
    #[error("{0}")]
    Unauthenticated(String),

    /// A bearer token was presented but is invalid or expired.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// No credentials at all on a protected route.
    #[error("Not authenticated")]
    MissingCredentials,

    /// The caller is authenticated but does not own the resource.
    #[error("{0}")]
    Forbidden(String),

    /// Store or other infrastructure failure; detail is logged, never
    /// returned to the caller.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response format for API errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, "already_exists", msg.clone()),
            ApiError::OperationFailed(msg) => {
                (StatusCode::BAD_REQUEST, "operation_failed", msg.clone())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Unauthenticated(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthenticated", msg.clone())
            }
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "Invalid or expired token".to_string(),
            ),
            ApiError::MissingCredentials => (
                StatusCode::FORBIDDEN,
                "not_authenticated",
                "Not authenticated".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_code.to_string(),
            message,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<OrgError> for ApiError {
    fn from(err: OrgError) -> Self {
        match err {
            OrgError::Validation { message } => ApiError::Validation(message),
            OrgError::AlreadyExists { entity } => {
                ApiError::Conflict(format!("{entity} already exists"))
            }
            OrgError::NotFound { entity, .. } => ApiError::NotFound(format!("{entity} not found")),
            OrgError::AuthenticationFailed { reason } => ApiError::Unauthenticated(reason),
            OrgError::AuthorizationDenied { reason } => ApiError::Forbidden(reason),
            OrgError::Database(detail) | OrgError::Crypto(detail) | OrgError::Internal(detail) => {
                ApiError::Internal(detail)
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| {
                errs.iter()
                    .filter_map(|e| e.message.as_ref().map(ToString::to_string))
            })
            .collect();
        ApiError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_maps_to_conflict() {
        let err = ApiError::from(OrgError::AlreadyExists {
            entity: "organization".into(),
        });
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn infrastructure_detail_is_not_leaked() {
        let response = ApiError::Internal("connection refused to 10.0.0.1".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_carries_www_authenticate() {
        let response = ApiError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
