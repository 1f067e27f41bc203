use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklane_core::{AppResult, NonEmptyString};

use crate::{AccessGrantId, PermissionMatrix, RoleId};

/// Named, reusable bundle of module/action/field selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
    id: AccessGrantId,
    name: NonEmptyString,
    entries: PermissionMatrix,
    created_at: DateTime<Utc>,
}

impl AccessGrant {
    /// Creates a validated access grant.
    pub fn new(
        id: AccessGrantId,
        name: impl Into<String>,
        entries: PermissionMatrix,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            entries,
            created_at,
        })
    }

    /// Returns the grant identifier.
    #[must_use]
    pub fn id(&self) -> AccessGrantId {
        self.id
    }

    /// Returns the grant name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the grant's permission selections.
    #[must_use]
    pub fn matrix(&self) -> &PermissionMatrix {
        &self.entries
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a copy with a new name and matrix, keeping id and creation time.
    pub fn revise(&self, name: impl Into<String>, entries: PermissionMatrix) -> AppResult<Self> {
        Self::new(self.id, name, entries, self.created_at)
    }
}

/// Named set of access grant references assigned to users.
///
/// A role stores ids only; effective permissions are always recomputed from
/// the referenced grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    access_ids: BTreeSet<AccessGrantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<i32>,
}

impl Role {
    /// Creates a validated role.
    pub fn new(
        id: RoleId,
        name: impl Into<String>,
        access_ids: impl IntoIterator<Item = AccessGrantId>,
        priority: Option<i32>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            access_ids: access_ids.into_iter().collect(),
            priority,
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the role name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns referenced access grant ids.
    #[must_use]
    pub fn access_ids(&self) -> &BTreeSet<AccessGrantId> {
        &self.access_ids
    }

    /// Returns whether the role references a grant.
    #[must_use]
    pub fn references(&self, access_id: AccessGrantId) -> bool {
        self.access_ids.contains(&access_id)
    }

    /// Returns the optional ordering priority.
    #[must_use]
    pub fn priority(&self) -> Option<i32> {
        self.priority
    }

    /// Returns a copy referencing a different set of grants.
    #[must_use]
    pub fn with_access_ids(&self, access_ids: impl IntoIterator<Item = AccessGrantId>) -> Self {
        Self {
            access_ids: access_ids.into_iter().collect(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{AccessGrant, Role};
    use crate::{AccessGrantId, PermissionMatrix, RoleId};

    #[test]
    fn access_grant_requires_name() {
        let grant = AccessGrant::new(AccessGrantId::new(), " ", PermissionMatrix::new(), Utc::now());
        assert!(grant.is_err());
    }

    #[test]
    fn role_deduplicates_access_ids() {
        let access_id = AccessGrantId::new();
        let role = Role::new(RoleId::new(), "Leads", [access_id, access_id], Some(1));
        assert!(role.is_ok());

        let role = role.unwrap_or_else(|_| unreachable!());
        assert_eq!(role.access_ids().len(), 1);
        assert!(role.references(access_id));
    }

    #[test]
    fn role_serializes_with_access_ids_key() {
        let access_id = AccessGrantId::new();
        let role = Role::new(RoleId::new(), "Leads", [access_id], None)
            .unwrap_or_else(|_| unreachable!());

        let value = serde_json::to_value(&role).unwrap_or_default();
        assert_eq!(
            value["accessIds"],
            serde_json::json!([access_id.to_string()])
        );
        assert!(value.get("priority").is_none());
    }

    #[test]
    fn access_grant_serializes_entries_and_created_at() {
        let grant = AccessGrant::new(
            AccessGrantId::new(),
            "Viewer",
            PermissionMatrix::new(),
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!());

        let value = serde_json::to_value(&grant).unwrap_or_default();
        assert!(value["entries"].is_array());
        assert!(value["createdAt"].is_string());
    }
}
