use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{ActionId, FieldId, ModuleName};

/// Merged permissions of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePermissions {
    granted_actions: BTreeSet<ActionId>,
    restricted_fields_by_action: BTreeMap<ActionId, BTreeSet<FieldId>>,
}

impl ModulePermissions {
    pub(crate) fn new(
        granted_actions: BTreeSet<ActionId>,
        restricted_fields_by_action: BTreeMap<ActionId, BTreeSet<FieldId>>,
    ) -> Self {
        Self {
            granted_actions,
            restricted_fields_by_action,
        }
    }

    /// Returns actions granted through any grant.
    #[must_use]
    pub fn granted_actions(&self) -> &BTreeSet<ActionId> {
        &self.granted_actions
    }

    /// Returns fields that stay restricted per granted action.
    #[must_use]
    pub fn restricted_fields_by_action(&self) -> &BTreeMap<ActionId, BTreeSet<FieldId>> {
        &self.restricted_fields_by_action
    }
}

/// Read-only permissions resolved for a role.
///
/// Built by [`crate::resolve_role`] and never mutated; rebuild it when the
/// role or its grants change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectivePermissionSet {
    modules: BTreeMap<ModuleName, ModulePermissions>,
}

impl EffectivePermissionSet {
    pub(crate) fn from_modules(modules: BTreeMap<ModuleName, ModulePermissions>) -> Self {
        Self { modules }
    }

    /// Returns whether the action is granted on the module.
    #[must_use]
    pub fn can_access(&self, module: &ModuleName, action: &ActionId) -> bool {
        self.modules
            .get(module)
            .is_some_and(|permissions| permissions.granted_actions.contains(action))
    }

    /// Returns whether the field stays restricted for a granted action.
    ///
    /// Always false for actions that are not granted.
    #[must_use]
    pub fn is_field_restricted(
        &self,
        module: &ModuleName,
        action: &ActionId,
        field: &FieldId,
    ) -> bool {
        self.modules
            .get(module)
            .and_then(|permissions| permissions.restricted_fields_by_action.get(action))
            .is_some_and(|fields| fields.contains(field))
    }

    /// Returns the merged permissions of a module.
    #[must_use]
    pub fn module(&self, module: &ModuleName) -> Option<&ModulePermissions> {
        self.modules.get(module)
    }

    /// Returns granted actions of a module, empty when the module is absent.
    #[must_use]
    pub fn granted_actions(&self, module: &ModuleName) -> BTreeSet<ActionId> {
        self.modules
            .get(module)
            .map(|permissions| permissions.granted_actions.clone())
            .unwrap_or_default()
    }

    /// Returns restricted fields of a granted action, empty otherwise.
    #[must_use]
    pub fn restricted_fields(&self, module: &ModuleName, action: &ActionId) -> BTreeSet<FieldId> {
        self.modules
            .get(module)
            .and_then(|permissions| permissions.restricted_fields_by_action.get(action))
            .cloned()
            .unwrap_or_default()
    }

    /// Iterates modules with at least one granted action.
    pub fn modules(&self) -> impl Iterator<Item = (&ModuleName, &ModulePermissions)> {
        self.modules.iter()
    }

    /// Returns whether nothing is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Returns whether the action is granted on the module.
#[must_use]
pub fn can_access(effective: &EffectivePermissionSet, module: &ModuleName, action: &ActionId) -> bool {
    effective.can_access(module, action)
}

/// Returns whether the field stays restricted for a granted action.
#[must_use]
pub fn is_field_restricted(
    effective: &EffectivePermissionSet,
    module: &ModuleName,
    action: &ActionId,
    field: &FieldId,
) -> bool {
    effective.is_field_restricted(module, action, field)
}
