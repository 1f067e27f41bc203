use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{ActionId, FieldId, ModuleName};

/// Selected actions and per-action field restrictions for one module.
///
/// Every restricted action is also a selected action and no restricted field
/// set is empty. Both rules are restored on construction and deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PermissionEntryRecord", rename_all = "camelCase")]
pub struct PermissionEntry {
    module: ModuleName,
    actions: BTreeSet<ActionId>,
    restricted_fields: BTreeMap<ActionId, BTreeSet<FieldId>>,
}

impl PermissionEntry {
    /// Creates an entry, dropping restrictions on actions that are not selected.
    #[must_use]
    pub fn new(
        module: ModuleName,
        actions: BTreeSet<ActionId>,
        restricted_fields: BTreeMap<ActionId, BTreeSet<FieldId>>,
    ) -> Self {
        let restricted_fields = restricted_fields
            .into_iter()
            .filter(|(action, fields)| actions.contains(action) && !fields.is_empty())
            .collect();

        Self {
            module,
            actions,
            restricted_fields,
        }
    }

    pub(crate) fn empty(module: ModuleName) -> Self {
        Self {
            module,
            actions: BTreeSet::new(),
            restricted_fields: BTreeMap::new(),
        }
    }

    /// Returns the module this entry belongs to.
    #[must_use]
    pub fn module(&self) -> &ModuleName {
        &self.module
    }

    /// Returns the selected actions.
    #[must_use]
    pub fn actions(&self) -> &BTreeSet<ActionId> {
        &self.actions
    }

    /// Returns restricted fields keyed by action.
    #[must_use]
    pub fn restricted_fields(&self) -> &BTreeMap<ActionId, BTreeSet<FieldId>> {
        &self.restricted_fields
    }

    /// Returns the restricted fields of one action, if any.
    #[must_use]
    pub fn fields(&self, action: &ActionId) -> Option<&BTreeSet<FieldId>> {
        self.restricted_fields.get(action)
    }

    pub(crate) fn insert_action(&mut self, action: ActionId) {
        self.actions.insert(action);
    }

    pub(crate) fn remove_action(&mut self, action: &ActionId) {
        self.actions.remove(action);
        self.restricted_fields.remove(action);
    }

    pub(crate) fn insert_field(&mut self, action: &ActionId, field: FieldId) {
        if !self.actions.contains(action) {
            return;
        }

        self.restricted_fields
            .entry(action.clone())
            .or_default()
            .insert(field);
    }

    pub(crate) fn remove_field(&mut self, action: &ActionId, field: &FieldId) {
        let Some(fields) = self.restricted_fields.get_mut(action) else {
            return;
        };

        fields.remove(field);
        if fields.is_empty() {
            self.restricted_fields.remove(action);
        }
    }

    fn absorb(&mut self, other: Self) {
        self.actions.extend(other.actions);
        for (action, fields) in other.restricted_fields {
            self.restricted_fields
                .entry(action)
                .or_default()
                .extend(fields);
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PermissionEntryRecord {
    module: ModuleName,
    #[serde(default)]
    actions: BTreeSet<ActionId>,
    #[serde(default)]
    restricted_fields: BTreeMap<ActionId, BTreeSet<FieldId>>,
}

impl From<PermissionEntryRecord> for PermissionEntry {
    fn from(record: PermissionEntryRecord) -> Self {
        Self::new(record.module, record.actions, record.restricted_fields)
    }
}

/// Sparse permission selections of one access grant.
///
/// A module without selected actions has no entry. The matrix is a value:
/// mutation goes through the functions in [`crate::mutator`], which return a
/// new matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PermissionEntry>", into = "Vec<PermissionEntry>")]
pub struct PermissionMatrix {
    entries: BTreeMap<ModuleName, PermissionEntry>,
}

impl PermissionMatrix {
    /// Creates an empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matrix from entries, merging duplicate modules and dropping
    /// entries without actions.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = PermissionEntry>) -> Self {
        let mut merged: BTreeMap<ModuleName, PermissionEntry> = BTreeMap::new();
        for entry in entries {
            match merged.get_mut(entry.module()) {
                Some(existing) => existing.absorb(entry),
                None => {
                    merged.insert(entry.module.clone(), entry);
                }
            }
        }
        merged.retain(|_, entry| !entry.actions.is_empty());

        Self { entries: merged }
    }

    /// Returns the actions selected for a module, empty when it has no entry.
    #[must_use]
    pub fn get_actions(&self, module: &ModuleName) -> BTreeSet<ActionId> {
        self.entries
            .get(module)
            .map(|entry| entry.actions.clone())
            .unwrap_or_default()
    }

    /// Returns restricted fields of an action, empty when none are restricted
    /// or the action is not selected.
    #[must_use]
    pub fn get_fields(&self, module: &ModuleName, action: &ActionId) -> BTreeSet<FieldId> {
        self.entries
            .get(module)
            .and_then(|entry| entry.fields(action))
            .cloned()
            .unwrap_or_default()
    }

    /// Returns whether an action is selected for a module.
    #[must_use]
    pub fn has_action(&self, module: &ModuleName, action: &ActionId) -> bool {
        self.entries
            .get(module)
            .is_some_and(|entry| entry.actions.contains(action))
    }

    /// Returns whether a field is restricted for a selected action.
    #[must_use]
    pub fn has_field(&self, module: &ModuleName, action: &ActionId, field: &FieldId) -> bool {
        self.entries
            .get(module)
            .and_then(|entry| entry.fields(action))
            .is_some_and(|fields| fields.contains(field))
    }

    /// Returns the entry for a module, if it has any selected action.
    #[must_use]
    pub fn entry(&self, module: &ModuleName) -> Option<&PermissionEntry> {
        self.entries.get(module)
    }

    /// Iterates entries ordered by module name.
    pub fn entries(&self) -> impl Iterator<Item = &PermissionEntry> {
        self.entries.values()
    }

    /// Iterates modules that have at least one selected action.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleName> {
        self.entries.keys()
    }

    /// Returns the number of modules with selected actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entry_or_empty(&mut self, module: &ModuleName) -> &mut PermissionEntry {
        self.entries
            .entry(module.clone())
            .or_insert_with(|| PermissionEntry::empty(module.clone()))
    }

    pub(crate) fn entry_mut(&mut self, module: &ModuleName) -> Option<&mut PermissionEntry> {
        self.entries.get_mut(module)
    }

    pub(crate) fn prune(&mut self, module: &ModuleName) {
        if self
            .entries
            .get(module)
            .is_some_and(|entry| entry.actions.is_empty())
        {
            self.entries.remove(module);
        }
    }
}

impl From<Vec<PermissionEntry>> for PermissionMatrix {
    fn from(entries: Vec<PermissionEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<PermissionMatrix> for Vec<PermissionEntry> {
    fn from(matrix: PermissionMatrix) -> Self {
        matrix.entries.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use super::{PermissionEntry, PermissionMatrix};
    use crate::{ActionId, FieldId, ModuleName};

    fn task() -> ModuleName {
        ModuleName::new("Task")
    }

    #[test]
    fn missing_module_reads_as_empty() {
        let matrix = PermissionMatrix::new();
        assert!(matrix.get_actions(&task()).is_empty());
        assert!(
            matrix
                .get_fields(&task(), &ActionId::new("VIEW"))
                .is_empty()
        );
    }

    #[test]
    fn entry_drops_restrictions_on_unselected_actions() {
        let entry = PermissionEntry::new(
            task(),
            BTreeSet::from([ActionId::new("VIEW")]),
            BTreeMap::from([
                (
                    ActionId::new("VIEW"),
                    BTreeSet::from([FieldId::new("salary")]),
                ),
                (
                    ActionId::new("UPDATE"),
                    BTreeSet::from([FieldId::new("owner")]),
                ),
                (ActionId::new("DELETE"), BTreeSet::new()),
            ]),
        );

        assert_eq!(entry.restricted_fields().len(), 1);
        assert!(entry.fields(&ActionId::new("UPDATE")).is_none());
    }

    #[test]
    fn from_entries_merges_duplicates_and_drops_empty_modules() {
        let matrix = PermissionMatrix::from_entries([
            PermissionEntry::new(
                task(),
                BTreeSet::from([ActionId::new("VIEW")]),
                BTreeMap::new(),
            ),
            PermissionEntry::new(
                task(),
                BTreeSet::from([ActionId::new("DELETE")]),
                BTreeMap::new(),
            ),
            PermissionEntry::new(ModuleName::new("Project"), BTreeSet::new(), BTreeMap::new()),
        ]);

        assert_eq!(matrix.len(), 1);
        assert_eq!(
            matrix.get_actions(&task()),
            BTreeSet::from([ActionId::new("DELETE"), ActionId::new("VIEW")])
        );
    }

    #[test]
    fn deserialization_restores_entry_invariants() {
        let raw = r#"[
            {"module": "Task", "actions": ["VIEW"], "restrictedFields": {"VIEW": ["salary"], "UPDATE": ["owner"]}},
            {"module": "Project", "actions": [], "restrictedFields": {"VIEW": ["budget"]}}
        ]"#;

        let matrix: PermissionMatrix = serde_json::from_str(raw).unwrap_or_default();

        assert_eq!(matrix.len(), 1);
        assert!(matrix.entry(&ModuleName::new("Project")).is_none());
        assert!(
            matrix
                .get_fields(&task(), &ActionId::new("UPDATE"))
                .is_empty()
        );
        assert_eq!(
            matrix.get_fields(&task(), &ActionId::new("VIEW")),
            BTreeSet::from([FieldId::new("salary")])
        );
    }

    #[test]
    fn serializes_as_entry_array() {
        let matrix = PermissionMatrix::from_entries([PermissionEntry::new(
            task(),
            BTreeSet::from([ActionId::new("VIEW")]),
            BTreeMap::new(),
        )]);

        let value = serde_json::to_value(&matrix).unwrap_or_default();
        assert_eq!(
            value,
            serde_json::json!([
                {"module": "Task", "actions": ["VIEW"], "restrictedFields": {}}
            ])
        );
    }
}
