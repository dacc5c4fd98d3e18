//! OrgHub Registry — the organization lifecycle orchestrator.
//!
//! Creating, renaming, and deleting an organization each span three
//! independently-consistent resources (identity record, administrator
//! credential, storage collection) with no cross-resource transaction
//! underneath. The registry sequences the steps, stamps in-progress
//! status markers on the identity record, and compensates manually
//! where the workflow defines an undo.

pub mod service;

pub use service::{OrganizationRegistry, RegisterOrganization, RenameOrganization};
