use tasklane_domain::{AccessGrantId, PermissionMatrix};

/// Input payload for creating access grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccessGrantInput {
    /// Display name of the grant.
    pub name: String,
    /// Selections built in the grant editor.
    pub matrix: PermissionMatrix,
}

/// Input payload for replacing an access grant's name and selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAccessGrantInput {
    /// New display name of the grant.
    pub name: String,
    /// New selections.
    pub matrix: PermissionMatrix,
}

/// Input payload for creating roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Display name of the role.
    pub name: String,
    /// Grants the role references.
    pub access_ids: Vec<AccessGrantId>,
    /// Optional ordering priority.
    pub priority: Option<i32>,
}
