//! Database-specific error types and conversions.

use orghub_core::error::OrgError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique index violation: {entity}")]
    UniqueViolation { entity: String },

    #[error("Cryptography error: {0}")]
    Crypto(String),
}

impl DbError {
    /// Classify a write error, turning a unique-index violation into
    /// [`DbError::UniqueViolation`].
    ///
    /// The unique index is the authority on duplicates: a racing
    /// insert that passed its application-level precheck still fails
    /// here, and callers must treat it exactly like a precheck miss.
    pub fn classify_write(err: surrealdb::Error, entity: &str) -> Self {
        if err.to_string().contains("already contains") {
            DbError::UniqueViolation {
                entity: entity.to_string(),
            }
        } else {
            DbError::Surreal(err)
        }
    }
}

impl From<DbError> for OrgError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => OrgError::NotFound { entity, id },
            DbError::UniqueViolation { entity } => OrgError::AlreadyExists { entity },
            DbError::Crypto(msg) => OrgError::Crypto(msg),
            other => OrgError::Database(other.to_string()),
        }
    }
}
