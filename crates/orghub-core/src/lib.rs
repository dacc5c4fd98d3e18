//! OrgHub Core — domain models, repository traits, and the shared
//! error taxonomy.
//!
//! This crate has no I/O. Storage implementations live in `orghub-db`,
//! token handling in `orghub-auth`, and the provisioning workflow in
//! `orghub-registry`.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{OrgError, OrgResult};
