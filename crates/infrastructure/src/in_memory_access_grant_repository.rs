use std::collections::HashMap;

use async_trait::async_trait;
use tasklane_application::AccessGrantRepository;
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{AccessGrant, AccessGrantId};
use tokio::sync::RwLock;

/// In-memory access grant repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryAccessGrantRepository {
    grants: RwLock<HashMap<AccessGrantId, AccessGrant>>,
}

impl InMemoryAccessGrantRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessGrantRepository for InMemoryAccessGrantRepository {
    async fn save_grant(&self, grant: AccessGrant) -> AppResult<()> {
        self.grants.write().await.insert(grant.id(), grant);
        Ok(())
    }

    async fn find_grant(&self, access_id: AccessGrantId) -> AppResult<Option<AccessGrant>> {
        Ok(self.grants.read().await.get(&access_id).cloned())
    }

    async fn find_grants(&self, access_ids: &[AccessGrantId]) -> AppResult<Vec<AccessGrant>> {
        let grants = self.grants.read().await;

        Ok(access_ids
            .iter()
            .filter_map(|access_id| grants.get(access_id).cloned())
            .collect())
    }

    async fn list_grants(&self) -> AppResult<Vec<AccessGrant>> {
        let mut values: Vec<AccessGrant> = self.grants.read().await.values().cloned().collect();
        values.sort_by(|left, right| {
            left.name()
                .as_str()
                .cmp(right.name().as_str())
                .then_with(|| left.id().cmp(&right.id()))
        });

        Ok(values)
    }

    async fn delete_grant(&self, access_id: AccessGrantId) -> AppResult<()> {
        if self.grants.write().await.remove(&access_id).is_none() {
            return Err(AppError::NotFound(format!(
                "access grant '{access_id}' does not exist"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tasklane_application::AccessGrantRepository;
    use tasklane_core::AppError;
    use tasklane_domain::{AccessGrant, AccessGrantId, PermissionMatrix};

    use super::InMemoryAccessGrantRepository;

    fn grant(name: &str) -> AccessGrant {
        AccessGrant::new(AccessGrantId::new(), name, PermissionMatrix::new(), Utc::now())
            .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn list_grants_is_sorted_by_name() {
        let repository = InMemoryAccessGrantRepository::new();
        for name in ["Viewer", "Admin", "Editor"] {
            let saved = repository.save_grant(grant(name)).await;
            assert!(saved.is_ok());
        }

        let names: Vec<String> = repository
            .list_grants()
            .await
            .unwrap_or_default()
            .iter()
            .map(|grant| grant.name().as_str().to_owned())
            .collect();

        assert_eq!(names, vec!["Admin", "Editor", "Viewer"]);
    }

    #[tokio::test]
    async fn find_grants_skips_unknown_ids() {
        let repository = InMemoryAccessGrantRepository::new();
        let viewer = grant("Viewer");
        let saved = repository.save_grant(viewer.clone()).await;
        assert!(saved.is_ok());

        let found = repository
            .find_grants(&[viewer.id(), AccessGrantId::new()])
            .await
            .unwrap_or_default();

        assert_eq!(found, vec![viewer]);
    }

    #[tokio::test]
    async fn delete_unknown_grant_is_not_found() {
        let repository = InMemoryAccessGrantRepository::new();
        let result = repository.delete_grant(AccessGrantId::new()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
