//! OrgHub Database — SurrealDB connection management, schema
//! migrations, and repository implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Repository implementations for the `orghub-core` traits
//! - The dynamic per-organization collection provisioner
//! - Error types ([`DbError`])

mod connection;
mod error;
mod provisioner;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use provisioner::SurrealCollectionProvisioner;
pub use schema::run_migrations;
