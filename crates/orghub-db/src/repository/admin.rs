//! SurrealDB implementation of [`AdminRepository`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use orghub_core::error::{OrgError, OrgResult};
use orghub_core::models::admin::{Admin, CreateAdmin};
use orghub_core::repository::AdminRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::warn;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct AdminRow {
    email: String,
    password_hash: String,
    organization_id: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct AdminRowWithId {
    record_id: String,
    email: String,
    password_hash: String,
    organization_id: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_admin(self, id: Uuid) -> Result<Admin, DbError> {
        let organization_id = Uuid::parse_str(&self.organization_id)
            .map_err(|e| DbError::Migration(format!("invalid organization UUID: {e}")))?;
        Ok(Admin {
            id,
            email: self.email,
            password_hash: self.password_hash,
            organization_id,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

impl AdminRowWithId {
    fn try_into_admin(self) -> Result<Admin, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        let organization_id = Uuid::parse_str(&self.organization_id)
            .map_err(|e| DbError::Migration(format!("invalid organization UUID: {e}")))?;
        Ok(Admin {
            id,
            email: self.email,
            password_hash: self.password_hash,
            organization_id,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
///
/// The salt is randomly generated for each call.
fn hash_password(password: &str) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Crypto(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Crypto(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against an Argon2id PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, or an error
/// if the stored hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, DbError> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| DbError::Crypto(format!("invalid hash format: {e}")))?;

    let argon2 = Argon2::default();
    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(DbError::Crypto(format!("verify error: {e}"))),
    }
}

/// Uniform authentication failure: the caller learns nothing about
/// which factor was wrong.
fn invalid_credentials() -> OrgError {
    OrgError::AuthenticationFailed {
        reason: "invalid credentials".into(),
    }
}

/// SurrealDB implementation of the Admin repository.
#[derive(Clone)]
pub struct SurrealAdminRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAdminRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find_by_email(&self, email: &str) -> OrgResult<Option<Admin>> {
        let email_owned = email.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM admin WHERE email = $email",
            )
            .bind(("email", email_owned))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminRowWithId> = result.take(0).map_err(DbError::from)?;
        rows.into_iter()
            .next()
            .map(|row| row.try_into_admin().map_err(OrgError::from))
            .transpose()
    }
}

impl<C: Connection> AdminRepository for SurrealAdminRepository<C> {
    async fn create(&self, input: CreateAdmin) -> OrgResult<Admin> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let password_hash = hash_password(&input.password)?;

        let result = self
            .db
            .query(
                "CREATE type::record('admin', $id) SET \
                 email = $email, password_hash = $password_hash, \
                 organization_id = $organization_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email))
            .bind(("password_hash", password_hash))
            .bind(("organization_id", input.organization_id.to_string()))
            .await
            .map_err(|e| DbError::classify_write(e, "admin"))?;

        // The unique index on email is the authority on duplicates.
        let mut result = result
            .check()
            .map_err(|e| DbError::classify_write(e, "admin"))?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "admin".into(),
            id: id_str,
        })?;

        Ok(row.into_admin(id)?)
    }

    async fn authenticate(&self, email: &str, password: &str) -> OrgResult<Admin> {
        let admin = match self.find_by_email(email).await? {
            Some(admin) => admin,
            None => {
                warn!(email = %email, "Authentication failed: unknown email");
                return Err(invalid_credentials());
            }
        };

        let valid = verify_password(password, &admin.password_hash)?;
        if !valid {
            warn!(email = %email, "Authentication failed: password mismatch");
            return Err(invalid_credentials());
        }

        if !admin.is_active {
            warn!(email = %email, "Authentication failed: admin inactive");
            return Err(invalid_credentials());
        }

        Ok(admin)
    }

    async fn get_by_id(&self, id: Uuid) -> OrgResult<Admin> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('admin', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "admin".into(),
            id: id_str,
        })?;

        Ok(row.into_admin(id)?)
    }

    async fn update_password(&self, id: Uuid, new_password: &str) -> OrgResult<bool> {
        let password_hash = hash_password(new_password)?;

        let result = self
            .db
            .query(
                "UPDATE type::record('admin', $id) SET \
                 password_hash = $password_hash",
            )
            .bind(("id", id.to_string()))
            .bind(("password_hash", password_hash))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        Ok(!rows.is_empty())
    }

    async fn delete(&self, id: Uuid) -> OrgResult<bool> {
        let mut result = self
            .db
            .query("DELETE type::record('admin', $id) RETURN BEFORE")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        Ok(!rows.is_empty())
    }
}
