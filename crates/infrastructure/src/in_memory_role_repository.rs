use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tasklane_application::RoleRepository;
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{Role, RoleId};
use tokio::sync::RwLock;

/// In-memory role repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<HashMap<RoleId, Role>>,
}

impl InMemoryRoleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn save_role(&self, role: Role) -> AppResult<()> {
        self.roles.write().await.insert(role.id(), role);
        Ok(())
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.roles.read().await.get(&role_id).cloned())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let mut values: Vec<Role> = self.roles.read().await.values().cloned().collect();
        values.sort_by(|left, right| {
            Reverse(left.priority())
                .cmp(&Reverse(right.priority()))
                .then_with(|| left.name().as_str().cmp(right.name().as_str()))
        });

        Ok(values)
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<()> {
        if self.roles.write().await.remove(&role_id).is_none() {
            return Err(AppError::NotFound(format!("role '{role_id}' does not exist")));
        }

        Ok(())
    }
}
