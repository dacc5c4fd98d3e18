//! Organization registry — create/rename/delete orchestration.

use orghub_core::error::{OrgError, OrgResult};
use orghub_core::models::admin::CreateAdmin;
use orghub_core::models::organization::{
    collection_name_for, normalize_name, CreateOrganization, Organization, OrganizationView,
    OrgStatus,
};
use orghub_core::repository::{AdminRepository, CollectionProvisioner, OrganizationRepository};
use tracing::{info, warn};
use uuid::Uuid;

/// Input for organization creation.
#[derive(Debug)]
pub struct RegisterOrganization {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input for organization update.
///
/// `email` is accepted for schema parity with creation but the admin
/// email is immutable and the field is not applied.
#[derive(Debug)]
pub struct RenameOrganization {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

/// The organization lifecycle orchestrator.
///
/// Generic over the repository traits so the workflow logic carries no
/// storage dependency. Uniqueness races are settled by the store's
/// unique indexes, never by in-process locking; concurrent rename or
/// delete on the same organization are not mutually excluded.
pub struct OrganizationRegistry<O, A, P>
where
    O: OrganizationRepository,
    A: AdminRepository,
    P: CollectionProvisioner,
{
    orgs: O,
    admins: A,
    collections: P,
}

impl<O, A, P> OrganizationRegistry<O, A, P>
where
    O: OrganizationRepository,
    A: AdminRepository,
    P: CollectionProvisioner,
{
    pub fn new(orgs: O, admins: A, collections: P) -> Self {
        Self {
            orgs,
            admins,
            collections,
        }
    }

    /// Provision a new organization: identity record, administrator,
    /// and storage collection, in that order.
    ///
    /// Steps and their failure handling:
    /// 1. Insert the identity record with `PendingAdmin` status,
    ///    reserving the name (unique index settles races).
    /// 2. Create the administrator. On failure the identity record is
    ///    deleted again — the organization cannot exist without its
    ///    administrator. An email conflict surfaces as the
    ///    organization already existing.
    /// 3. Attach the admin and activate the record.
    /// 4. Provision the storage collection, best-effort: the identity
    ///    record and admin are authoritative, the collection can be
    ///    recreated later.
    pub async fn create(&self, input: RegisterOrganization) -> OrgResult<OrganizationView> {
        let name = normalize_name(&input.name);

        // Application-level precheck; the unique index remains the
        // authority if a concurrent create slips past it.
        match self.orgs.get_by_name(&name).await {
            Ok(_) => {
                return Err(OrgError::AlreadyExists {
                    entity: "organization".into(),
                });
            }
            Err(OrgError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let collection_name = collection_name_for(&name);
        let org = self
            .orgs
            .create(CreateOrganization {
                name: name.clone(),
                collection_name: collection_name.clone(),
            })
            .await?;
        info!(organization = %name, id = %org.id, "Organization record inserted");

        let admin = match self
            .admins
            .create(CreateAdmin {
                email: input.email,
                password: input.password,
                organization_id: org.id,
            })
            .await
        {
            Ok(admin) => admin,
            Err(err) => {
                warn!(
                    organization = %name,
                    error = %err,
                    "Admin creation failed, rolling back organization record"
                );
                if let Err(rollback_err) = self.orgs.delete(org.id).await {
                    warn!(
                        organization = %name,
                        error = %rollback_err,
                        "Rollback of organization record failed"
                    );
                }
                return Err(match err {
                    // An email conflict means this organization cannot
                    // be created; report it as the organization
                    // already existing.
                    OrgError::AlreadyExists { .. } => OrgError::AlreadyExists {
                        entity: "organization".into(),
                    },
                    other => other,
                });
            }
        };

        self.orgs.set_admin(org.id, admin.id).await?;

        match self.collections.create(&collection_name, None).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(collection = %collection_name, "Storage collection already present")
            }
            Err(err) => warn!(
                collection = %collection_name,
                error = %err,
                "Failed to provision storage collection"
            ),
        }

        info!(organization = %name, "Organization created successfully");
        self.get_by_id(org.id).await
    }

    /// Look up an organization by name and compose the user-facing
    /// view.
    pub async fn get_by_name(&self, name: &str) -> OrgResult<OrganizationView> {
        let org = self.orgs.get_by_name(&normalize_name(name)).await?;
        self.compose_view(org).await
    }

    /// Look up an organization by id and compose the user-facing
    /// view.
    pub async fn get_by_id(&self, id: Uuid) -> OrgResult<OrganizationView> {
        let org = self.orgs.get_by_id(id).await?;
        self.compose_view(org).await
    }

    /// Update an organization, migrating its storage collection when
    /// the name changes.
    ///
    /// The migration is copy-then-delete — the store has no atomic
    /// rename-with-contents. A failure between collection creation
    /// and the final record update leaves the record on the old name
    /// with status `Renaming` and possibly both collections present;
    /// that state is observable and never repaired automatically.
    pub async fn rename(
        &self,
        old_name: &str,
        input: RenameOrganization,
        requesting_admin: Uuid,
    ) -> OrgResult<OrganizationView> {
        let old_name = normalize_name(old_name);
        let org = self.orgs.get_by_name(&old_name).await?;
        authorize(&org, requesting_admin)?;

        let new_name = normalize_name(&input.name);
        if new_name != org.name {
            match self.orgs.get_by_name(&new_name).await {
                Ok(_) => {
                    return Err(OrgError::AlreadyExists {
                        entity: "organization".into(),
                    });
                }
                Err(OrgError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }

            let new_collection = collection_name_for(&new_name);
            self.orgs.set_status(org.id, OrgStatus::Renaming).await?;

            self.collections.create(&new_collection, None).await?;
            if self.collections.exists(&org.collection_name).await? {
                self.collections
                    .copy_contents(&org.collection_name, &new_collection)
                    .await?;
                self.collections.drop(&org.collection_name).await?;
            }

            self.orgs.rename(org.id, &new_name, &new_collection).await?;
            info!(
                from = %old_name,
                to = %new_name,
                "Organization renamed, storage collection migrated"
            );
        } else {
            self.orgs.touch(org.id).await?;
        }

        if let Some(password) = input.password {
            if !self.admins.update_password(requesting_admin, &password).await? {
                warn!(admin = %requesting_admin, "Password update matched no admin");
            }
        }

        self.get_by_name(&new_name).await
    }

    /// Delete an organization and its associated resources.
    ///
    /// The storage collection and credential are removed first,
    /// best-effort; the identity record goes last so it stays the
    /// authoritative existence check — a crash partway never leaves
    /// an orphaned-but-still-listed organization. Success means the
    /// final deletion actually removed a record.
    pub async fn delete(&self, name: &str, requesting_admin: Uuid) -> OrgResult<bool> {
        let name = normalize_name(name);
        let org = self.orgs.get_by_name(&name).await?;
        authorize(&org, requesting_admin)?;

        self.orgs.set_status(org.id, OrgStatus::Deleting).await?;

        match self.collections.drop(&org.collection_name).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(collection = %org.collection_name, "Storage collection was absent")
            }
            Err(err) => warn!(
                collection = %org.collection_name,
                error = %err,
                "Failed to drop storage collection"
            ),
        }

        if let Some(admin_id) = org.admin_id {
            match self.admins.delete(admin_id).await {
                Ok(true) => {}
                Ok(false) => warn!(admin = %admin_id, "Admin record was absent"),
                Err(err) => {
                    warn!(admin = %admin_id, error = %err, "Failed to delete admin record")
                }
            }
        }

        let removed = self.orgs.delete(org.id).await?;
        if removed {
            info!(organization = %name, "Organization deleted successfully");
        }
        Ok(removed)
    }

    /// Compose the user-facing view, joining in the admin's email.
    ///
    /// A record without an attached admin is mid-provisioning and not
    /// user-visible.
    async fn compose_view(&self, org: Organization) -> OrgResult<OrganizationView> {
        let admin_id = org.admin_id.ok_or_else(|| OrgError::NotFound {
            entity: "organization".into(),
            id: format!("name={}", org.name),
        })?;
        let admin = self.admins.get_by_id(admin_id).await?;

        Ok(OrganizationView {
            id: org.id,
            organization_name: org.name,
            collection_name: org.collection_name,
            admin_email: admin.email,
            created_at: org.created_at,
            updated_at: org.updated_at,
        })
    }
}

/// Only the organization's own administrator may mutate it.
fn authorize(org: &Organization, admin_id: Uuid) -> OrgResult<()> {
    if org.admin_id == Some(admin_id) {
        Ok(())
    } else {
        Err(OrgError::AuthorizationDenied {
            reason: "admin does not own this organization".into(),
        })
    }
}
