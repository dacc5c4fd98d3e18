//! Dynamic per-organization collection management.
//!
//! Provisioned collections are SCHEMALESS tables named
//! `org_<organization>`. They carry no identity of their own — the
//! registry treats them purely as named resources with
//! create/exists/copy/drop semantics.

use std::collections::BTreeMap;

use orghub_core::error::{OrgError, OrgResult};
use orghub_core::repository::CollectionProvisioner;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{info, warn};

use crate::error::DbError;

/// Subset of the `INFO FOR DB` response: table name → definition DDL.
#[derive(Debug, SurrealValue)]
struct DbInfo {
    tables: BTreeMap<String, String>,
}

/// Table and index names are interpolated into DDL strings, so only
/// `[A-Za-z0-9_]` names are accepted. Registry-derived names always
/// satisfy this; the check guards direct callers.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn reject_unsafe(name: &str) -> OrgResult<()> {
    if is_safe_name(name) {
        Ok(())
    } else {
        Err(OrgError::Validation {
            message: format!("invalid collection name: {name}"),
        })
    }
}

/// SurrealDB implementation of the collection provisioner.
#[derive(Clone)]
pub struct SurrealCollectionProvisioner<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCollectionProvisioner<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn table_names(&self) -> OrgResult<BTreeMap<String, String>> {
        let mut result = self
            .db
            .query("INFO FOR DB")
            .await
            .map_err(DbError::from)?;
        let info: Option<DbInfo> = result.take(0).map_err(DbError::from)?;
        Ok(info.map(|i| i.tables).unwrap_or_default())
    }
}

impl<C: Connection> CollectionProvisioner for SurrealCollectionProvisioner<C> {
    async fn exists(&self, name: &str) -> OrgResult<bool> {
        reject_unsafe(name)?;
        Ok(self.table_names().await?.contains_key(name))
    }

    async fn create(&self, name: &str, validator: Option<&str>) -> OrgResult<bool> {
        reject_unsafe(name)?;
        if self.exists(name).await? {
            warn!(collection = %name, "Collection already exists");
            return Ok(false);
        }

        // Two supporting indexes on every provisioned collection, for
        // time-ordered queries over its documents.
        let ddl = format!(
            "DEFINE TABLE {name} SCHEMALESS;
             DEFINE INDEX idx_{name}_created_at ON TABLE {name} COLUMNS created_at;
             DEFINE INDEX idx_{name}_updated_at ON TABLE {name} COLUMNS updated_at;"
        );
        self.db
            .query(ddl)
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        if let Some(extra) = validator {
            self.db
                .query(extra.to_string())
                .await
                .map_err(DbError::from)?
                .check()
                .map_err(|e| DbError::Migration(e.to_string()))?;
        }

        info!(collection = %name, "Collection created");
        Ok(true)
    }

    async fn drop(&self, name: &str) -> OrgResult<bool> {
        reject_unsafe(name)?;
        if !self.exists(name).await? {
            warn!(collection = %name, "Collection does not exist");
            return Ok(false);
        }

        self.db
            .query(format!("REMOVE TABLE {name}"))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        info!(collection = %name, "Collection dropped");
        Ok(true)
    }

    async fn copy_contents(&self, source: &str, target: &str) -> OrgResult<bool> {
        reject_unsafe(source)?;
        reject_unsafe(target)?;
        if !self.exists(source).await? {
            warn!(collection = %source, "Source collection does not exist");
            return Ok(false);
        }

        // Value-copy: record ids are table-qualified in SurrealDB, so
        // the target assigns fresh ones. The source is left intact.
        self.db
            .query(format!("INSERT INTO {target} (SELECT * OMIT id FROM {source})"))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        info!(source = %source, target = %target, "Collection contents copied");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_names() {
        assert!(is_safe_name("org_acme_1"));
        assert!(!is_safe_name(""));
        assert!(!is_safe_name("org_acme; REMOVE TABLE admin"));
        assert!(!is_safe_name("org-acme"));
    }
}
