//! Organization domain model.
//!
//! An organization is a fully isolated tenant: one identity record, one
//! administrator, one dedicated storage collection. The storage
//! collection name is derived deterministically from the organization
//! name so that renames can migrate data to a predictable target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix for per-organization storage collections.
pub const COLLECTION_PREFIX: &str = "org_";

/// Lifecycle state of an organization record.
///
/// Every multi-step operation stamps its in-progress state on the
/// record before touching other resources, so a crash mid-workflow is
/// detectable by a later read. No state is ever repaired automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgStatus {
    /// Identity record inserted, administrator not yet attached.
    PendingAdmin,
    Active,
    Renaming,
    Deleting,
}

/// A provisioned organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Unique, normalized (lowercase `[a-z0-9_]`) name.
    pub name: String,
    /// Name of the dedicated storage collection (`org_<name>`).
    pub collection_name: String,
    /// The single administrator. `None` only while provisioning is in
    /// flight; such records are not user-visible.
    pub admin_id: Option<Uuid>,
    pub status: OrgStatus,
    pub created_at: DateTime<Utc>,
    /// Set on rename or credential refresh, never at creation.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields required to insert a new organization record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub collection_name: String,
}

/// The user-facing composition of an organization and its
/// administrator's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationView {
    pub id: Uuid,
    pub organization_name: String,
    pub collection_name: String,
    pub admin_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Normalize an organization name for storage and lookup.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Derive the storage collection name for a normalized organization
/// name.
pub fn collection_name_for(normalized_name: &str) -> String {
    format!("{COLLECTION_PREFIX}{normalized_name}")
}
