use async_trait::async_trait;
use tasklane_core::AppResult;
use tasklane_domain::{AccessGrant, AccessGrantId, GrantCatalog, Role, RoleId, User, UserId};

/// Source of the module/action/field catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Loads the current catalog.
    async fn load_catalog(&self) -> AppResult<GrantCatalog>;
}

/// Repository port for access grant persistence.
#[async_trait]
pub trait AccessGrantRepository: Send + Sync {
    /// Inserts or replaces a grant.
    async fn save_grant(&self, grant: AccessGrant) -> AppResult<()>;

    /// Finds one grant by id.
    async fn find_grant(&self, access_id: AccessGrantId) -> AppResult<Option<AccessGrant>>;

    /// Returns the grants that exist among the requested ids.
    async fn find_grants(&self, access_ids: &[AccessGrantId]) -> AppResult<Vec<AccessGrant>>;

    /// Lists all grants ordered by name.
    async fn list_grants(&self) -> AppResult<Vec<AccessGrant>>;

    /// Deletes a grant, failing with `NotFound` when it does not exist.
    async fn delete_grant(&self, access_id: AccessGrantId) -> AppResult<()>;
}

/// Repository port for role persistence.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Inserts or replaces a role.
    async fn save_role(&self, role: Role) -> AppResult<()>;

    /// Finds one role by id.
    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>>;

    /// Lists roles by descending priority, then name.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Deletes a role, failing with `NotFound` when it does not exist.
    async fn delete_role(&self, role_id: RoleId) -> AppResult<()>;
}

/// Repository port for the user-to-role lookup.
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// Finds a user by id.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>>;
}
