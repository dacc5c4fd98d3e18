//! Schema definitions and migration runner for SurrealDB.
//!
//! The two identity tables use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. The status enum is stored as a string
//! with an ASSERT constraint. Per-organization data collections are
//! NOT defined here — they are created dynamically by the
//! [`SurrealCollectionProvisioner`](crate::SurrealCollectionProvisioner).

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — identity tables
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Organizations (tenant identity records)
-- =======================================================================
DEFINE TABLE organization SCHEMAFULL;
DEFINE FIELD name ON TABLE organization TYPE string;
DEFINE FIELD collection_name ON TABLE organization TYPE string;
DEFINE FIELD admin_id ON TABLE organization TYPE option<string>;
DEFINE FIELD status ON TABLE organization TYPE string \
    ASSERT $value IN ['PendingAdmin', 'Active', 'Renaming', 'Deleting'];
DEFINE FIELD created_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE organization TYPE option<datetime>;
DEFINE INDEX idx_organization_name ON TABLE organization \
    COLUMNS name UNIQUE;
DEFINE INDEX idx_organization_collection ON TABLE organization \
    COLUMNS collection_name UNIQUE;

-- =======================================================================
-- Administrators (one per organization)
-- =======================================================================
DEFINE TABLE admin SCHEMAFULL;
DEFINE FIELD email ON TABLE admin TYPE string;
DEFINE FIELD password_hash ON TABLE admin TYPE string;
DEFINE FIELD organization_id ON TABLE admin TYPE string;
DEFINE FIELD is_active ON TABLE admin TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE admin TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_admin_email ON TABLE admin COLUMNS email UNIQUE;
DEFINE INDEX idx_admin_organization ON TABLE admin \
    COLUMNS organization_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}
