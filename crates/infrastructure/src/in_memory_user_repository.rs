use std::collections::HashMap;

use async_trait::async_trait;
use tasklane_application::UserRoleRepository;
use tasklane_core::AppResult;
use tasklane_domain::{User, UserId};
use tokio::sync::RwLock;

/// In-memory user-to-role lookup.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user.
    pub async fn save_user(&self, user: User) {
        self.users.write().await.insert(user.id(), user);
    }
}

#[async_trait]
impl UserRoleRepository for InMemoryUserRepository {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }
}
