//! SurrealDB implementation of [`OrganizationRepository`].

use chrono::{DateTime, Utc};
use orghub_core::error::OrgResult;
use orghub_core::models::organization::{CreateOrganization, Organization, OrgStatus};
use orghub_core::repository::OrganizationRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct OrganizationRow {
    name: String,
    collection_name: String,
    admin_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct OrganizationRowWithId {
    record_id: String,
    name: String,
    collection_name: String,
    admin_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

fn parse_status(s: &str) -> Result<OrgStatus, DbError> {
    match s {
        "PendingAdmin" => Ok(OrgStatus::PendingAdmin),
        "Active" => Ok(OrgStatus::Active),
        "Renaming" => Ok(OrgStatus::Renaming),
        "Deleting" => Ok(OrgStatus::Deleting),
        other => Err(DbError::Migration(format!(
            "unknown organization status: {other}"
        ))),
    }
}

fn status_to_string(s: OrgStatus) -> &'static str {
    match s {
        OrgStatus::PendingAdmin => "PendingAdmin",
        OrgStatus::Active => "Active",
        OrgStatus::Renaming => "Renaming",
        OrgStatus::Deleting => "Deleting",
    }
}

fn parse_admin_id(admin_id: Option<String>) -> Result<Option<Uuid>, DbError> {
    admin_id
        .map(|s| {
            Uuid::parse_str(&s)
                .map_err(|e| DbError::Migration(format!("invalid admin UUID: {e}")))
        })
        .transpose()
}

impl OrganizationRow {
    fn into_organization(self, id: Uuid) -> Result<Organization, DbError> {
        Ok(Organization {
            id,
            name: self.name,
            collection_name: self.collection_name,
            admin_id: parse_admin_id(self.admin_id)?,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl OrganizationRowWithId {
    fn try_into_organization(self) -> Result<Organization, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        Ok(Organization {
            id,
            name: self.name,
            collection_name: self.collection_name,
            admin_id: parse_admin_id(self.admin_id)?,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Organization repository.
#[derive(Clone)]
pub struct SurrealOrganizationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrganizationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OrganizationRepository for SurrealOrganizationRepository<C> {
    async fn create(&self, input: CreateOrganization) -> OrgResult<Organization> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('organization', $id) SET \
                 name = $name, collection_name = $collection_name, \
                 status = $status",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("collection_name", input.collection_name))
            .bind(("status", status_to_string(OrgStatus::PendingAdmin)))
            .await
            .map_err(|e| DbError::classify_write(e, "organization"))?;

        // The unique indexes on name and collection_name are the
        // authority on duplicates; a racing insert surfaces here even
        // when the caller's precheck passed.
        let mut result = result
            .check()
            .map_err(|e| DbError::classify_write(e, "organization"))?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: id_str,
        })?;

        Ok(row.into_organization(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> OrgResult<Organization> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('organization', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: id_str,
        })?;

        Ok(row.into_organization(id)?)
    }

    async fn get_by_name(&self, name: &str) -> OrgResult<Organization> {
        let name_owned = name.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM organization WHERE name = $name",
            )
            .bind(("name", name_owned))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: format!("name={name}"),
        })?;

        Ok(row.try_into_organization()?)
    }

    async fn set_admin(&self, id: Uuid, admin_id: Uuid) -> OrgResult<Organization> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('organization', $id) SET \
                 admin_id = $admin_id, status = 'Active'",
            )
            .bind(("id", id_str.clone()))
            .bind(("admin_id", admin_id.to_string()))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: id_str,
        })?;

        Ok(row.into_organization(id)?)
    }

    async fn rename(
        &self,
        id: Uuid,
        new_name: &str,
        new_collection_name: &str,
    ) -> OrgResult<Organization> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('organization', $id) SET \
                 name = $name, collection_name = $collection_name, \
                 status = 'Active', updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", new_name.to_string()))
            .bind(("collection_name", new_collection_name.to_string()))
            .await
            .map_err(|e| DbError::classify_write(e, "organization"))?;

        // A racing rename/create onto the same name fails on the
        // unique index here.
        let mut result = result
            .check()
            .map_err(|e| DbError::classify_write(e, "organization"))?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: id_str,
        })?;

        Ok(row.into_organization(id)?)
    }

    async fn touch(&self, id: Uuid) -> OrgResult<Organization> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('organization', $id) SET \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "organization".into(),
            id: id_str,
        })?;

        Ok(row.into_organization(id)?)
    }

    async fn set_status(&self, id: Uuid, status: OrgStatus) -> OrgResult<()> {
        self.db
            .query("UPDATE type::record('organization', $id) SET status = $status")
            .bind(("id", id.to_string()))
            .bind(("status", status_to_string(status)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> OrgResult<bool> {
        let mut result = self
            .db
            .query("DELETE type::record('organization', $id) RETURN BEFORE")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        Ok(!rows.is_empty())
    }
}
