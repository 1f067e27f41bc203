use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tasklane_core::{AppError, AppResult};

use crate::{ActionId, FieldId, ModuleName, PermissionMatrix, TriState, tri_state};

/// Actions and restrictable fields one module supports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogModuleRecord", rename_all = "camelCase")]
pub struct CatalogModule {
    module: ModuleName,
    actions: Vec<ActionId>,
    restrictable_fields: BTreeMap<ActionId, Vec<FieldId>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogModuleRecord {
    module: ModuleName,
    actions: Vec<ActionId>,
    #[serde(default)]
    restrictable_fields: BTreeMap<ActionId, Vec<FieldId>>,
}

impl TryFrom<CatalogModuleRecord> for CatalogModule {
    type Error = AppError;

    fn try_from(record: CatalogModuleRecord) -> Result<Self, Self::Error> {
        Self::new(record.module, record.actions, record.restrictable_fields)
    }
}

impl CatalogModule {
    /// Creates a validated catalog module.
    pub fn new(
        module: impl Into<ModuleName>,
        actions: Vec<ActionId>,
        restrictable_fields: BTreeMap<ActionId, Vec<FieldId>>,
    ) -> AppResult<Self> {
        let value = Self {
            module: module.into(),
            actions,
            restrictable_fields,
        };
        value.validate()?;

        Ok(value)
    }

    /// Returns the module identifier.
    #[must_use]
    pub fn module(&self) -> &ModuleName {
        &self.module
    }

    /// Returns supported actions in catalog order.
    #[must_use]
    pub fn actions(&self) -> &[ActionId] {
        self.actions.as_slice()
    }

    /// Returns restrictable fields of an action in catalog order.
    #[must_use]
    pub fn restrictable_fields(&self, action: &ActionId) -> &[FieldId] {
        self.restrictable_fields
            .get(action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns whether the module supports an action.
    #[must_use]
    pub fn supports_action(&self, action: &ActionId) -> bool {
        self.actions.contains(action)
    }

    fn validate(&self) -> AppResult<()> {
        let module = self.module.as_str();
        if module.trim().is_empty() {
            return Err(AppError::Validation(
                "catalog module name must not be empty".to_owned(),
            ));
        }

        let mut seen_actions = BTreeSet::new();
        for action in &self.actions {
            if action.as_str().trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "catalog module '{module}' contains an empty action"
                )));
            }
            if !seen_actions.insert(action) {
                return Err(AppError::Validation(format!(
                    "catalog module '{module}' lists action '{action}' more than once"
                )));
            }
        }

        for (action, fields) in &self.restrictable_fields {
            if !seen_actions.contains(action) {
                return Err(AppError::Validation(format!(
                    "catalog module '{module}' lists restrictable fields for unknown action '{action}'"
                )));
            }

            let mut seen_fields = BTreeSet::new();
            for field in fields {
                if field.as_str().trim().is_empty() {
                    return Err(AppError::Validation(format!(
                        "catalog action '{module}/{action}' contains an empty field"
                    )));
                }
                if !seen_fields.insert(field) {
                    return Err(AppError::Validation(format!(
                        "catalog action '{module}/{action}' lists field '{field}' more than once"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Universe of modules, actions and restrictable fields.
///
/// Loaded once from configuration and read-only afterwards. Iteration follows
/// the configured order, which is also the order editors render controls in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogDocument", into = "CatalogDocument")]
pub struct GrantCatalog {
    modules: Vec<CatalogModule>,
}

#[derive(Serialize, Deserialize)]
struct CatalogDocument {
    modules: Vec<CatalogModule>,
}

impl TryFrom<CatalogDocument> for GrantCatalog {
    type Error = AppError;

    fn try_from(document: CatalogDocument) -> Result<Self, Self::Error> {
        Self::new(document.modules)
    }
}

impl From<GrantCatalog> for CatalogDocument {
    fn from(catalog: GrantCatalog) -> Self {
        Self {
            modules: catalog.modules,
        }
    }
}

impl GrantCatalog {
    /// Creates a validated catalog.
    pub fn new(modules: Vec<CatalogModule>) -> AppResult<Self> {
        let mut seen = BTreeSet::new();
        for module in &modules {
            module.validate()?;
            if !seen.insert(module.module()) {
                return Err(AppError::Validation(format!(
                    "catalog lists module '{}' more than once",
                    module.module()
                )));
            }
        }

        Ok(Self { modules })
    }

    /// Iterates modules in catalog order.
    pub fn modules(&self) -> impl Iterator<Item = &CatalogModule> {
        self.modules.iter()
    }

    /// Finds a module definition.
    #[must_use]
    pub fn module(&self, module: &ModuleName) -> Option<&CatalogModule> {
        self.modules.iter().find(|value| value.module() == module)
    }

    /// Returns the actions of a module in catalog order, empty when unknown.
    #[must_use]
    pub fn actions(&self, module: &ModuleName) -> &[ActionId] {
        self.module(module)
            .map(CatalogModule::actions)
            .unwrap_or_default()
    }

    /// Returns restrictable fields of an action in catalog order, empty when unknown.
    #[must_use]
    pub fn restrictable_fields(&self, module: &ModuleName, action: &ActionId) -> &[FieldId] {
        self.module(module)
            .map(|value| value.restrictable_fields(action))
            .unwrap_or_default()
    }

    /// Returns a module's selected actions in catalog order.
    ///
    /// Selected actions the catalog does not know follow in lexical order.
    #[must_use]
    pub fn ordered_actions(&self, matrix: &PermissionMatrix, module: &ModuleName) -> Vec<ActionId> {
        order_by_catalog(self.actions(module), matrix.get_actions(module))
    }

    /// Returns an action's restricted fields in catalog order.
    #[must_use]
    pub fn ordered_fields(
        &self,
        matrix: &PermissionMatrix,
        module: &ModuleName,
        action: &ActionId,
    ) -> Vec<FieldId> {
        order_by_catalog(
            self.restrictable_fields(module, action),
            matrix.get_fields(module, action),
        )
    }

    /// Summarizes a module's action selection for its "select all" control.
    #[must_use]
    pub fn module_tri_state(&self, matrix: &PermissionMatrix, module: &ModuleName) -> TriState {
        let actions = self.actions(module);
        let selected = actions
            .iter()
            .filter(|action| matrix.has_action(module, action))
            .count();

        tri_state(selected, actions.len())
    }

    /// Summarizes an action's field restrictions for its "select all" control.
    #[must_use]
    pub fn action_tri_state(
        &self,
        matrix: &PermissionMatrix,
        module: &ModuleName,
        action: &ActionId,
    ) -> TriState {
        let fields = self.restrictable_fields(module, action);
        let selected = fields
            .iter()
            .filter(|field| matrix.has_field(module, action, field))
            .count();

        tri_state(selected, fields.len())
    }

    /// Checks that every selection in the matrix exists in the catalog.
    pub fn validate_matrix(&self, matrix: &PermissionMatrix) -> AppResult<()> {
        for entry in matrix.entries() {
            let module = entry.module();
            let Some(definition) = self.module(module) else {
                return Err(AppError::Validation(format!(
                    "module '{module}' is not part of the catalog"
                )));
            };

            for action in entry.actions() {
                if !definition.supports_action(action) {
                    return Err(AppError::Validation(format!(
                        "action '{action}' is not supported by module '{module}'"
                    )));
                }
            }

            for (action, fields) in entry.restricted_fields() {
                let restrictable = definition.restrictable_fields(action);
                if restrictable.is_empty() {
                    return Err(AppError::Validation(format!(
                        "action '{module}/{action}' has no restrictable fields"
                    )));
                }

                if let Some(field) = fields.iter().find(|field| !restrictable.contains(field)) {
                    return Err(AppError::Validation(format!(
                        "field '{field}' cannot be restricted on '{module}/{action}'"
                    )));
                }
            }
        }

        Ok(())
    }
}

fn order_by_catalog<T: Ord + Clone>(catalog_order: &[T], mut selected: BTreeSet<T>) -> Vec<T> {
    let mut ordered = Vec::with_capacity(selected.len());
    for value in catalog_order {
        if selected.remove(value) {
            ordered.push(value.clone());
        }
    }
    ordered.extend(selected);
    ordered
}
