//! Administrator domain model.
//!
//! Each organization has exactly one administrator, and each
//! administrator governs exactly one organization. The link is
//! established by the registry only after both records exist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organization administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    /// Globally unique login email.
    pub email: String,
    /// Argon2id PHC-format hash. The plaintext secret is never stored.
    pub password_hash: String,
    /// The organization this admin governs.
    pub organization_id: Uuid,
    /// Inactive admins cannot authenticate.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a new administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdmin {
    pub email: String,
    /// Plaintext secret; hashed by the credential store before
    /// persisting.
    pub password: String,
    pub organization_id: Uuid,
}
