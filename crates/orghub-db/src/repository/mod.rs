//! SurrealDB repository implementations.

mod admin;
mod organization;

pub use admin::{SurrealAdminRepository, verify_password};
pub use organization::SurrealOrganizationRepository;
