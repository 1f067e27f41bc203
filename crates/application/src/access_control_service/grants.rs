use super::*;

use chrono::Utc;

use crate::AccessGrantEditor;

impl AccessControlService {
    /// Lists access grants ordered by name.
    pub async fn list_access_grants(&self) -> AppResult<Vec<AccessGrant>> {
        self.grant_repository.list_grants().await
    }

    /// Returns one access grant.
    pub async fn find_access_grant(&self, access_id: AccessGrantId) -> AppResult<AccessGrant> {
        self.grant_repository
            .find_grant(access_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("access grant '{access_id}' does not exist")))
    }

    /// Validates and persists a new access grant.
    pub async fn create_access_grant(
        &self,
        input: CreateAccessGrantInput,
    ) -> AppResult<AccessGrant> {
        let catalog = self.catalog().await?;
        catalog.validate_matrix(&input.matrix)?;

        let grant = AccessGrant::new(AccessGrantId::new(), input.name, input.matrix, Utc::now())?;
        self.grant_repository.save_grant(grant.clone()).await?;

        info!(
            access_id = %grant.id(),
            name = grant.name().as_str(),
            modules = grant.matrix().len(),
            "created access grant"
        );

        Ok(grant)
    }

    /// Replaces the name and selections of an existing access grant.
    pub async fn update_access_grant(
        &self,
        access_id: AccessGrantId,
        input: UpdateAccessGrantInput,
    ) -> AppResult<AccessGrant> {
        let existing = self.find_access_grant(access_id).await?;
        let catalog = self.catalog().await?;
        catalog.validate_matrix(&input.matrix)?;

        let grant = existing.revise(input.name, input.matrix)?;
        self.grant_repository.save_grant(grant.clone()).await?;

        info!(access_id = %access_id, "updated access grant");

        Ok(grant)
    }

    /// Deletes an access grant.
    ///
    /// Roles keep referencing the deleted id; resolution skips it.
    pub async fn delete_access_grant(&self, access_id: AccessGrantId) -> AppResult<()> {
        self.grant_repository.delete_grant(access_id).await?;
        info!(access_id = %access_id, "deleted access grant");
        Ok(())
    }

    /// Opens an editor with an empty matrix.
    pub async fn new_grant_editor(&self) -> AppResult<AccessGrantEditor> {
        Ok(AccessGrantEditor::new(self.catalog().await?))
    }

    /// Opens an editor seeded with an existing grant's selections.
    pub async fn edit_access_grant(&self, access_id: AccessGrantId) -> AppResult<AccessGrantEditor> {
        let grant = self.find_access_grant(access_id).await?;
        Ok(AccessGrantEditor::from_grant(self.catalog().await?, &grant))
    }
}
