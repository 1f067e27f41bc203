use tasklane_core::{AppError, AppResult};
use tasklane_domain::{
    AccessGrant, ActionId, CatalogModule, FieldId, GrantCatalog, ModuleName, PermissionIntent,
    PermissionMatrix, TriState,
};

/// Editing session over one access grant's permission matrix.
///
/// Intents are checked against the catalog before they reach the pure
/// mutator. Each applied intent that changes the matrix is one undo step.
#[derive(Debug, Clone)]
pub struct AccessGrantEditor {
    catalog: GrantCatalog,
    matrix: PermissionMatrix,
    undo_stack: Vec<PermissionMatrix>,
    redo_stack: Vec<PermissionMatrix>,
}

impl AccessGrantEditor {
    /// Starts an editor with nothing selected.
    #[must_use]
    pub fn new(catalog: GrantCatalog) -> Self {
        Self::with_matrix(catalog, PermissionMatrix::new())
    }

    /// Starts an editor from an existing grant's selections.
    #[must_use]
    pub fn from_grant(catalog: GrantCatalog, grant: &AccessGrant) -> Self {
        Self::with_matrix(catalog, grant.matrix().clone())
    }

    fn with_matrix(catalog: GrantCatalog, matrix: PermissionMatrix) -> Self {
        Self {
            catalog,
            matrix,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Returns the catalog the editor validates against.
    #[must_use]
    pub fn catalog(&self) -> &GrantCatalog {
        &self.catalog
    }

    /// Returns the current matrix.
    #[must_use]
    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    /// Consumes the editor and returns the current matrix.
    #[must_use]
    pub fn into_matrix(self) -> PermissionMatrix {
        self.matrix
    }

    /// Validates and applies one intent. Returns whether the matrix changed.
    pub fn apply(&mut self, intent: PermissionIntent) -> AppResult<bool> {
        self.validate_intent(&intent)?;

        let next = intent.apply(&self.matrix);
        if next == self.matrix {
            return Ok(false);
        }

        let previous = std::mem::replace(&mut self.matrix, next);
        self.undo_stack.push(previous);
        self.redo_stack.clear();

        Ok(true)
    }

    /// Selects or deselects one action.
    pub fn toggle_action(
        &mut self,
        module: &ModuleName,
        action: &ActionId,
        selected: bool,
    ) -> AppResult<bool> {
        self.apply(PermissionIntent::SetAction {
            module: module.clone(),
            action: action.clone(),
            selected,
        })
    }

    /// Restricts or unrestricts one field of a selected action.
    pub fn toggle_field(
        &mut self,
        module: &ModuleName,
        action: &ActionId,
        field: &FieldId,
        selected: bool,
    ) -> AppResult<bool> {
        self.apply(PermissionIntent::SetField {
            module: module.clone(),
            action: action.clone(),
            field: field.clone(),
            selected,
        })
    }

    /// Drives a module's "select all" control over every catalog action.
    pub fn toggle_all_actions(&mut self, module: &ModuleName, selected: bool) -> AppResult<bool> {
        let actions = self.known_module(module)?.actions().to_vec();
        self.apply(PermissionIntent::SetAllActions {
            module: module.clone(),
            actions,
            selected,
        })
    }

    /// Drives an action's "select all" control over every restrictable field.
    pub fn toggle_all_fields(
        &mut self,
        module: &ModuleName,
        action: &ActionId,
        selected: bool,
    ) -> AppResult<bool> {
        let fields = self.catalog.restrictable_fields(module, action).to_vec();
        self.apply(PermissionIntent::SetAllFields {
            module: module.clone(),
            action: action.clone(),
            fields,
            selected,
        })
    }

    /// Reverts the last change. Returns whether anything was reverted.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };

        let current = std::mem::replace(&mut self.matrix, previous);
        self.redo_stack.push(current);
        true
    }

    /// Reapplies the last reverted change. Returns whether anything was reapplied.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };

        let current = std::mem::replace(&mut self.matrix, next);
        self.undo_stack.push(current);
        true
    }

    /// Returns whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Returns the module-level "select all" state.
    #[must_use]
    pub fn module_state(&self, module: &ModuleName) -> TriState {
        self.catalog.module_tri_state(&self.matrix, module)
    }

    /// Returns the action-level "select all fields" state.
    #[must_use]
    pub fn action_state(&self, module: &ModuleName, action: &ActionId) -> TriState {
        self.catalog.action_tri_state(&self.matrix, module, action)
    }

    /// Returns a module's selected actions in catalog order.
    #[must_use]
    pub fn selected_actions(&self, module: &ModuleName) -> Vec<ActionId> {
        self.catalog.ordered_actions(&self.matrix, module)
    }

    /// Checks the current matrix against the catalog, e.g. after the catalog
    /// changed under a stored grant.
    pub fn validate(&self) -> AppResult<()> {
        self.catalog.validate_matrix(&self.matrix)
    }

    fn validate_intent(&self, intent: &PermissionIntent) -> AppResult<()> {
        let module = self.known_module(intent.module())?;

        let require_action = |action: &ActionId| {
            if module.supports_action(action) {
                Ok(())
            } else {
                Err(AppError::Validation(format!(
                    "action '{action}' is not supported by module '{}'",
                    module.module()
                )))
            }
        };

        let require_field = |action: &ActionId, field: &FieldId| {
            if module.restrictable_fields(action).contains(field) {
                Ok(())
            } else {
                Err(AppError::Validation(format!(
                    "field '{field}' cannot be restricted on '{}/{action}'",
                    module.module()
                )))
            }
        };

        match intent {
            PermissionIntent::SetAction { action, .. } => require_action(action),
            PermissionIntent::SetField { action, field, .. } => {
                require_action(action)?;
                require_field(action, field)
            }
            PermissionIntent::SetAllActions { actions, .. } => {
                actions.iter().try_for_each(require_action)
            }
            PermissionIntent::SetAllFields { action, fields, .. } => {
                require_action(action)?;
                fields
                    .iter()
                    .try_for_each(|field| require_field(action, field))
            }
        }
    }

    fn known_module(&self, module: &ModuleName) -> AppResult<&CatalogModule> {
        self.catalog.module(module).ok_or_else(|| {
            AppError::Validation(format!("module '{module}' is not part of the catalog"))
        })
    }
}
