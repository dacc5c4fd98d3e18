//! Repository trait definitions for data access abstraction.
//!
//! All operations are async. Uniqueness of organization names,
//! collection names, and admin emails is enforced by the storage
//! layer's unique indexes — an index violation is the authoritative
//! `AlreadyExists` signal, regardless of any application-level
//! precheck.

use uuid::Uuid;

use crate::error::OrgResult;
use crate::models::admin::{Admin, CreateAdmin};
use crate::models::organization::{CreateOrganization, Organization, OrgStatus};

/// Persistence of organization identity records.
pub trait OrganizationRepository: Send + Sync {
    /// Insert a new record with `admin_id = None` and status
    /// `PendingAdmin`, reserving the name. Fails with `AlreadyExists`
    /// when `name` or `collection_name` is taken.
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = OrgResult<Organization>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = OrgResult<Organization>> + Send;

    fn get_by_name(&self, name: &str) -> impl Future<Output = OrgResult<Organization>> + Send;

    /// Attach the administrator and flip the record to `Active`.
    fn set_admin(
        &self,
        id: Uuid,
        admin_id: Uuid,
    ) -> impl Future<Output = OrgResult<Organization>> + Send;

    /// Move the record to a new name and collection, stamping
    /// `updated_at` and returning the status to `Active`. Fails with
    /// `AlreadyExists` when the new name is taken.
    fn rename(
        &self,
        id: Uuid,
        new_name: &str,
        new_collection_name: &str,
    ) -> impl Future<Output = OrgResult<Organization>> + Send;

    /// Refresh `updated_at` without changing anything else.
    fn touch(&self, id: Uuid) -> impl Future<Output = OrgResult<Organization>> + Send;

    fn set_status(
        &self,
        id: Uuid,
        status: OrgStatus,
    ) -> impl Future<Output = OrgResult<()>> + Send;

    /// Remove the record. Returns `false` when nothing was deleted.
    fn delete(&self, id: Uuid) -> impl Future<Output = OrgResult<bool>> + Send;
}

/// Persistence and verification of administrator credentials.
///
/// All operations are single-document reads or writes; the email
/// unique index is the only cross-record invariant.
pub trait AdminRepository: Send + Sync {
    /// Hash the secret and insert the record with `is_active = true`.
    /// Fails with `AlreadyExists` when the email is taken.
    fn create(&self, input: CreateAdmin) -> impl Future<Output = OrgResult<Admin>> + Send;

    /// Verify credentials. Fails with a uniform
    /// `AuthenticationFailed` whether the email is unknown, the
    /// secret mismatches, or the admin is inactive.
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = OrgResult<Admin>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = OrgResult<Admin>> + Send;

    /// Rehash and store a new secret. Returns `false` when the admin
    /// does not exist.
    fn update_password(
        &self,
        id: Uuid,
        new_password: &str,
    ) -> impl Future<Output = OrgResult<bool>> + Send;

    /// Remove the record. Returns `false` when nothing was deleted.
    fn delete(&self, id: Uuid) -> impl Future<Output = OrgResult<bool>> + Send;
}

/// Lifecycle of per-organization storage collections.
///
/// Collections are opaque named containers; the registry never looks
/// inside them.
pub trait CollectionProvisioner: Send + Sync {
    fn exists(&self, name: &str) -> impl Future<Output = OrgResult<bool>> + Send;

    /// Create the collection and its default `created_at`/`updated_at`
    /// indexes. `validator` is optional extra field-definition DDL
    /// applied after creation. Returns `false` (without error) when
    /// the collection already exists.
    fn create(
        &self,
        name: &str,
        validator: Option<&str>,
    ) -> impl Future<Output = OrgResult<bool>> + Send;

    /// Drop the collection. Returns `false` when it did not exist.
    fn drop(&self, name: &str) -> impl Future<Output = OrgResult<bool>> + Send;

    /// Bulk value-copy of every document from `source` into `target`.
    /// The source is left intact; record ids are reassigned by the
    /// target. Returns `false` when the source does not exist.
    fn copy_contents(
        &self,
        source: &str,
        target: &str,
    ) -> impl Future<Output = OrgResult<bool>> + Send;
}
