use super::*;

impl AccessControlService {
    /// Lists roles by descending priority, then name.
    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.role_repository.list_roles().await
    }

    /// Returns one role.
    pub async fn find_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.role_repository
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    /// Creates a role referencing existing access grants.
    pub async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        self.require_existing_grants(&input.access_ids).await?;

        let role = Role::new(RoleId::new(), input.name, input.access_ids, input.priority)?;
        self.role_repository.save_role(role.clone()).await?;

        info!(
            role_id = %role.id(),
            name = role.name().as_str(),
            grants = role.access_ids().len(),
            "created role"
        );

        Ok(role)
    }

    /// Replaces the set of grants a role references.
    pub async fn update_role_access(
        &self,
        role_id: RoleId,
        access_ids: Vec<AccessGrantId>,
    ) -> AppResult<Role> {
        let existing = self.find_role(role_id).await?;
        self.require_existing_grants(&access_ids).await?;

        let role = existing.with_access_ids(access_ids);
        self.role_repository.save_role(role.clone()).await?;

        info!(role_id = %role_id, grants = role.access_ids().len(), "updated role access");

        Ok(role)
    }

    /// Deletes a role.
    pub async fn delete_role(&self, role_id: RoleId) -> AppResult<()> {
        self.role_repository.delete_role(role_id).await?;
        info!(role_id = %role_id, "deleted role");
        Ok(())
    }

    async fn require_existing_grants(&self, access_ids: &[AccessGrantId]) -> AppResult<()> {
        let found = self.grant_repository.find_grants(access_ids).await?;

        let missing: Vec<String> = access_ids
            .iter()
            .filter(|access_id| !found.iter().any(|grant| grant.id() == **access_id))
            .map(ToString::to_string)
            .collect();

        if missing.is_empty() {
            return Ok(());
        }

        Err(AppError::Validation(format!(
            "unknown access grant ids: {}",
            missing.join(", ")
        )))
    }
}
