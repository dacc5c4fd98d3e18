//! Request and response DTOs for the HTTP API.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use orghub_core::models::organization::OrganizationView;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

static ORGANIZATION_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex"));

/// Password policy: at least 8 characters with one uppercase letter,
/// one lowercase letter, and one digit.
fn validate_password(password: &str) -> Result<(), ValidationError> {
    fn fail(message: &'static str) -> ValidationError {
        let mut err = ValidationError::new("password");
        err.message = Some(message.into());
        err
    }

    if password.len() < 8 {
        return Err(fail("Password must be at least 8 characters long"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(fail("Password must contain at least one uppercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(fail("Password must contain at least one lowercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(fail("Password must contain at least one digit"));
    }
    Ok(())
}

/// Body for `POST /org/create`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    /// Organization name; lowercased before storage.
    #[validate(
        length(min = 3, max = 50, message = "Organization name must be 3-50 characters"),
        regex(
            path = *ORGANIZATION_NAME_RE,
            message = "Organization name must contain only alphanumeric characters and underscores"
        )
    )]
    pub organization_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = validate_password))]
    pub password: String,
}

/// Body for `PUT /org/update`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateOrganizationRequest {
    #[validate(
        length(min = 3, max = 50, message = "Organization name must be 3-50 characters"),
        regex(
            path = *ORGANIZATION_NAME_RE,
            message = "Organization name must contain only alphanumeric characters and underscores"
        )
    )]
    pub organization_name: String,

    /// Accepted for schema parity with creation; the admin email is
    /// immutable and this field is not applied.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// New admin secret; the current one is kept when absent.
    #[validate(custom(function = validate_password))]
    pub password: Option<String>,
}

/// Body for `POST /admin/login`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct GetOrganizationQuery {
    pub organization_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrganizationQuery {
    pub old_org_name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteOrganizationQuery {
    pub organization_name: String,
}

/// The organization + admin email view returned by every organization
/// endpoint.
#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    pub id: Uuid,
    pub organization_name: String,
    pub collection_name: String,
    pub admin_email: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<OrganizationView> for OrganizationResponse {
    fn from(view: OrganizationView) -> Self {
        Self {
            id: view.id,
            organization_name: view.organization_name,
            collection_name: view.collection_name,
            admin_email: view.admin_email,
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Token claims echoed by `GET /admin/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub admin_id: String,
    pub email: String,
    pub organization_id: String,
    pub exp: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(name: &str, password: &str) -> CreateOrganizationRequest {
        CreateOrganizationRequest {
            organization_name: name.into(),
            email: "a@x.com".into(),
            password: password.into(),
        }
    }

    #[test]
    fn password_policy() {
        assert!(create_request("acme", "weak").validate().is_err());
        assert!(create_request("acme", "abcd1234").validate().is_err());
        assert!(create_request("acme", "ABCD1234").validate().is_err());
        assert!(create_request("acme", "Abcdefgh").validate().is_err());
        assert!(create_request("acme", "Abcd1234").validate().is_ok());
    }

    #[test]
    fn organization_name_pattern() {
        assert!(create_request("invalid name!", "Abcd1234").validate().is_err());
        assert!(create_request("ab", "Abcd1234").validate().is_err());
        assert!(create_request("acme_1", "Abcd1234").validate().is_ok());
        assert!(create_request("Acme_1", "Abcd1234").validate().is_ok());
    }

    #[test]
    fn update_password_is_optional() {
        let request = UpdateOrganizationRequest {
            organization_name: "acme".into(),
            email: "a@x.com".into(),
            password: None,
        };
        assert!(request.validate().is_ok());

        let request = UpdateOrganizationRequest {
            password: Some("weak".into()),
            ..request
        };
        assert!(request.validate().is_err());
    }
}
