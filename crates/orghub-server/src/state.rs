//! Shared application state.

use std::sync::Arc;

use orghub_auth::{AuthConfig, AuthService};
use orghub_db::repository::{SurrealAdminRepository, SurrealOrganizationRepository};
use orghub_db::SurrealCollectionProvisioner;
use orghub_registry::OrganizationRegistry;
use surrealdb::{Connection, Surreal};

pub type Registry<C> = OrganizationRegistry<
    SurrealOrganizationRepository<C>,
    SurrealAdminRepository<C>,
    SurrealCollectionProvisioner<C>,
>;

/// Application state, generic over the SurrealDB engine so tests can
/// run the full router against the in-memory engine.
pub struct AppState<C: Connection> {
    pub registry: Arc<Registry<C>>,
    pub auth: Arc<AuthService<SurrealAdminRepository<C>>>,
    pub auth_config: AuthConfig,
}

impl<C: Connection> AppState<C> {
    /// Wire every repository onto the shared client handle.
    pub fn new(db: Surreal<C>, auth_config: AuthConfig) -> Self {
        let registry = OrganizationRegistry::new(
            SurrealOrganizationRepository::new(db.clone()),
            SurrealAdminRepository::new(db.clone()),
            SurrealCollectionProvisioner::new(db.clone()),
        );
        let auth = AuthService::new(SurrealAdminRepository::new(db), auth_config.clone());

        Self {
            registry: Arc::new(registry),
            auth: Arc::new(auth),
            auth_config,
        }
    }
}

// Manual impl: the engine type itself need not be Clone.
impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            auth: self.auth.clone(),
            auth_config: self.auth_config.clone(),
        }
    }
}
