//! Pure transitions over [`PermissionMatrix`] values.
//!
//! Every function returns a new matrix and never fails. Identifiers unknown
//! to the catalog are treated as currently unselected; validating intents
//! against the catalog is the editor's job.

use serde::{Deserialize, Serialize};

use crate::{ActionId, FieldId, ModuleName, PermissionMatrix};

/// Selects or deselects one action of a module.
///
/// Deselecting removes the action's field restrictions and drops the module
/// entry once it has no actions left.
#[must_use]
pub fn set_action(
    matrix: &PermissionMatrix,
    module: &ModuleName,
    action: &ActionId,
    selected: bool,
) -> PermissionMatrix {
    let mut next = matrix.clone();
    apply_action(&mut next, module, action, selected);
    next
}

/// Restricts or unrestricts one field of a selected action.
///
/// Returns the input unchanged when the action is not selected.
#[must_use]
pub fn set_field(
    matrix: &PermissionMatrix,
    module: &ModuleName,
    action: &ActionId,
    field: &FieldId,
    selected: bool,
) -> PermissionMatrix {
    let mut next = matrix.clone();
    apply_field(&mut next, module, action, field, selected);
    next
}

/// Applies [`set_action`] for every action in the given order as one intent.
#[must_use]
pub fn set_all_actions(
    matrix: &PermissionMatrix,
    module: &ModuleName,
    all_actions: &[ActionId],
    selected: bool,
) -> PermissionMatrix {
    let mut next = matrix.clone();
    for action in all_actions {
        apply_action(&mut next, module, action, selected);
    }
    next
}

/// Applies [`set_field`] for every field in the given order as one intent.
///
/// Returns the input unchanged when the action is not selected.
#[must_use]
pub fn set_all_fields(
    matrix: &PermissionMatrix,
    module: &ModuleName,
    action: &ActionId,
    all_fields: &[FieldId],
    selected: bool,
) -> PermissionMatrix {
    if !matrix.has_action(module, action) {
        return matrix.clone();
    }

    let mut next = matrix.clone();
    for field in all_fields {
        apply_field(&mut next, module, action, field, selected);
    }
    next
}

fn apply_action(
    matrix: &mut PermissionMatrix,
    module: &ModuleName,
    action: &ActionId,
    selected: bool,
) {
    if selected {
        matrix.entry_or_empty(module).insert_action(action.clone());
        return;
    }

    if let Some(entry) = matrix.entry_mut(module) {
        entry.remove_action(action);
    }
    matrix.prune(module);
}

fn apply_field(
    matrix: &mut PermissionMatrix,
    module: &ModuleName,
    action: &ActionId,
    field: &FieldId,
    selected: bool,
) {
    let Some(entry) = matrix.entry_mut(module) else {
        return;
    };

    if selected {
        entry.insert_field(action, field.clone());
    } else {
        entry.remove_field(action, field);
    }
}

/// One user gesture against a permission matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PermissionIntent {
    /// Toggle a single action.
    SetAction {
        /// Target module.
        module: ModuleName,
        /// Target action.
        action: ActionId,
        /// Desired selection state.
        selected: bool,
    },
    /// Toggle a single restricted field.
    SetField {
        /// Target module.
        module: ModuleName,
        /// Action owning the field.
        action: ActionId,
        /// Target field.
        field: FieldId,
        /// Desired selection state.
        selected: bool,
    },
    /// Module-level "select all" control.
    SetAllActions {
        /// Target module.
        module: ModuleName,
        /// Actions in catalog order.
        actions: Vec<ActionId>,
        /// Desired selection state.
        selected: bool,
    },
    /// Action-level "select all fields" control.
    SetAllFields {
        /// Target module.
        module: ModuleName,
        /// Action owning the fields.
        action: ActionId,
        /// Fields in catalog order.
        fields: Vec<FieldId>,
        /// Desired selection state.
        selected: bool,
    },
}

impl PermissionIntent {
    /// Returns the module the intent targets.
    #[must_use]
    pub fn module(&self) -> &ModuleName {
        match self {
            Self::SetAction { module, .. }
            | Self::SetField { module, .. }
            | Self::SetAllActions { module, .. }
            | Self::SetAllFields { module, .. } => module,
        }
    }

    /// Applies the intent and returns the resulting matrix.
    #[must_use]
    pub fn apply(&self, matrix: &PermissionMatrix) -> PermissionMatrix {
        match self {
            Self::SetAction {
                module,
                action,
                selected,
            } => set_action(matrix, module, action, *selected),
            Self::SetField {
                module,
                action,
                field,
                selected,
            } => set_field(matrix, module, action, field, *selected),
            Self::SetAllActions {
                module,
                actions,
                selected,
            } => set_all_actions(matrix, module, actions, *selected),
            Self::SetAllFields {
                module,
                action,
                fields,
                selected,
            } => set_all_fields(matrix, module, action, fields, *selected),
        }
    }
}
