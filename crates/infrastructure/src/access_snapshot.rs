use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;

use serde::Deserialize;
use tasklane_application::{AccessGrantRepository, RoleRepository};
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{AccessGrant, GrantCatalog, Role, User};
use tracing::info;

use crate::InMemoryUserRepository;

/// Stored grants, roles and users loaded from a single JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessSnapshot {
    /// Access grants in the snapshot.
    pub grants: Vec<AccessGrant>,
    /// Roles in the snapshot.
    pub roles: Vec<Role>,
    /// Users in the snapshot.
    pub users: Vec<User>,
}

impl AccessSnapshot {
    /// Parses a snapshot document.
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw)
            .map_err(|error| AppError::Validation(format!("invalid access snapshot: {error}")))
    }

    /// Reads and parses a snapshot document from disk.
    pub async fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read access snapshot '{}': {error}",
                path.display()
            ))
        })?;

        Self::from_json_str(raw.as_str())
    }

    /// Checks for duplicate ids and every grant matrix against the catalog.
    pub fn validate(&self, catalog: &GrantCatalog) -> AppResult<()> {
        reject_duplicate_ids("access grant", self.grants.iter().map(AccessGrant::id))?;
        reject_duplicate_ids("role", self.roles.iter().map(Role::id))?;
        reject_duplicate_ids("user", self.users.iter().map(User::id))?;

        for grant in &self.grants {
            catalog.validate_matrix(grant.matrix()).map_err(|error| {
                AppError::Validation(format!(
                    "access grant '{}' is invalid: {error}",
                    grant.name()
                ))
            })?;
        }

        Ok(())
    }

    /// Stores the snapshot contents in the given repositories.
    pub async fn seed(
        &self,
        grant_repository: &dyn AccessGrantRepository,
        role_repository: &dyn RoleRepository,
        user_repository: &InMemoryUserRepository,
    ) -> AppResult<()> {
        for grant in &self.grants {
            grant_repository.save_grant(grant.clone()).await?;
        }

        for role in &self.roles {
            role_repository.save_role(role.clone()).await?;
        }

        for user in &self.users {
            user_repository.save_user(user.clone()).await;
        }

        info!(
            grants = self.grants.len(),
            roles = self.roles.len(),
            users = self.users.len(),
            "seeded access snapshot"
        );

        Ok(())
    }
}

fn reject_duplicate_ids<T: Ord + Display>(
    kind: &str,
    ids: impl IntoIterator<Item = T>,
) -> AppResult<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if seen.contains(&id) {
            return Err(AppError::Validation(format!(
                "access snapshot lists {kind} '{id}' more than once"
            )));
        }
        seen.insert(id);
    }

    Ok(())
}
