use super::*;

use tasklane_domain::{missing_access_ids, resolve_role};

impl AccessControlService {
    /// Resolves the effective permissions of a role from its current grants.
    pub async fn resolve_role_permissions(
        &self,
        role_id: RoleId,
    ) -> AppResult<EffectivePermissionSet> {
        let role = self.find_role(role_id).await?;
        self.resolve(&role).await
    }

    /// Resolves the effective permissions of a user through their role.
    pub async fn effective_permissions_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<EffectivePermissionSet> {
        let user = self
            .user_repository
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))?;

        let role = self
            .role_repository
            .find_role(user.role_id())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "role '{}' assigned to user '{user_id}' does not exist",
                    user.role_id()
                ))
            })?;

        self.resolve(&role).await
    }

    /// Ensures a user may perform an action on a module.
    pub async fn require_access(
        &self,
        user_id: UserId,
        module: &ModuleName,
        action: &ActionId,
    ) -> AppResult<()> {
        let effective = self.effective_permissions_for_user(user_id).await?;
        if effective.can_access(module, action) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{user_id}' is missing action '{action}' on module '{module}'"
        )))
    }

    async fn resolve(&self, role: &Role) -> AppResult<EffectivePermissionSet> {
        let access_ids: Vec<AccessGrantId> = role.access_ids().iter().copied().collect();
        let grants = self.grant_repository.find_grants(&access_ids).await?;

        for stale_id in missing_access_ids(role, &grants) {
            warn!(
                role_id = %role.id(),
                access_id = %stale_id,
                "role references a missing access grant"
            );
        }

        let effective = resolve_role(role, &grants);
        debug!(
            role_id = %role.id(),
            grants = grants.len(),
            modules = effective.modules().count(),
            "resolved role permissions"
        );

        Ok(effective)
    }
}
