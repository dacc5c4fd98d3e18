//! Domain models for OrgHub.
//!
//! These are the core types shared across all crates.

pub mod admin;
pub mod organization;
