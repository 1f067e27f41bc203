mod grants;
mod resolution;
mod roles;


use std::sync::Arc;

use tasklane_core::{AppError, AppResult};
use tasklane_domain::{
    AccessGrant, AccessGrantId, ActionId, EffectivePermissionSet, GrantCatalog, ModuleName, Role,
    RoleId, UserId,
};
use tracing::{debug, info, warn};

use crate::access_ports::{
    AccessGrantRepository, CatalogProvider, CreateAccessGrantInput, CreateRoleInput,
    RoleRepository, UpdateAccessGrantInput, UserRoleRepository,
};

/// Application service for access grant administration and permission checks.
///
/// Effective permissions are recomputed from the repositories on every call.
/// Callers that want memoization key their cache on the role and grant
/// versions themselves.
#[derive(Clone)]
pub struct AccessControlService {
    catalog_provider: Arc<dyn CatalogProvider>,
    grant_repository: Arc<dyn AccessGrantRepository>,
    role_repository: Arc<dyn RoleRepository>,
    user_repository: Arc<dyn UserRoleRepository>,
}

impl AccessControlService {
    /// Creates a new service from required ports.
    #[must_use]
    pub fn new(
        catalog_provider: Arc<dyn CatalogProvider>,
        grant_repository: Arc<dyn AccessGrantRepository>,
        role_repository: Arc<dyn RoleRepository>,
        user_repository: Arc<dyn UserRoleRepository>,
    ) -> Self {
        Self {
            catalog_provider,
            grant_repository,
            role_repository,
            user_repository,
        }
    }

    /// Loads the current grant catalog.
    pub async fn catalog(&self) -> AppResult<GrantCatalog> {
        self.catalog_provider.load_catalog().await
    }
}
