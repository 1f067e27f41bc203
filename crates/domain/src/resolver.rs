use std::collections::{BTreeMap, BTreeSet};

use crate::{
    AccessGrant, AccessGrantId, ActionId, EffectivePermissionSet, FieldId, ModuleName,
    ModulePermissions, Role,
};

/// Merges the grants referenced by a role into its effective permissions.
///
/// Actions are additive: a module action is granted when any referenced grant
/// selects it. Field restrictions narrow: a field stays restricted only when
/// every grant selecting the action restricts it. Grants the role does not
/// reference are ignored, and referenced ids missing from `grants` are
/// skipped.
#[must_use]
pub fn resolve_role(role: &Role, grants: &[AccessGrant]) -> EffectivePermissionSet {
    let mut granted: BTreeMap<ModuleName, BTreeSet<ActionId>> = BTreeMap::new();
    let mut restricted: BTreeMap<(ModuleName, ActionId), BTreeSet<FieldId>> = BTreeMap::new();

    for grant in participating_grants(role, grants).into_values() {
        for entry in grant.matrix().entries() {
            let module = entry.module();
            granted
                .entry(module.clone())
                .or_default()
                .extend(entry.actions().iter().cloned());

            for action in entry.actions() {
                let contributed = entry.fields(action).cloned().unwrap_or_default();
                restricted
                    .entry((module.clone(), action.clone()))
                    .and_modify(|fields| fields.retain(|field| contributed.contains(field)))
                    .or_insert(contributed);
            }
        }
    }

    let mut restricted_by_module: BTreeMap<ModuleName, BTreeMap<ActionId, BTreeSet<FieldId>>> =
        BTreeMap::new();
    for ((module, action), fields) in restricted {
        if !fields.is_empty() {
            restricted_by_module
                .entry(module)
                .or_default()
                .insert(action, fields);
        }
    }

    let modules = granted
        .into_iter()
        .map(|(module, actions)| {
            let fields = restricted_by_module.remove(&module).unwrap_or_default();
            (module, ModulePermissions::new(actions, fields))
        })
        .collect();

    EffectivePermissionSet::from_modules(modules)
}

/// Returns ids the role references that have no matching grant.
#[must_use]
pub fn missing_access_ids(role: &Role, grants: &[AccessGrant]) -> Vec<AccessGrantId> {
    let available: BTreeSet<AccessGrantId> = grants.iter().map(AccessGrant::id).collect();

    role.access_ids()
        .iter()
        .filter(|access_id| !available.contains(access_id))
        .copied()
        .collect()
}

fn participating_grants<'a>(
    role: &Role,
    grants: &'a [AccessGrant],
) -> BTreeMap<AccessGrantId, &'a AccessGrant> {
    grants
        .iter()
        .filter(|grant| role.references(grant.id()))
        .map(|grant| (grant.id(), grant))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use chrono::Utc;
    use proptest::prelude::*;

    use super::{missing_access_ids, resolve_role};
    use crate::{
        AccessGrant, AccessGrantId, ActionId, FieldId, ModuleName, PermissionEntry,
        PermissionMatrix, Role, RoleId, can_access, is_field_restricted,
    };

    fn task() -> ModuleName {
        ModuleName::new("Task")
    }

    fn action(value: &str) -> ActionId {
        ActionId::new(value)
    }

    fn field(value: &str) -> FieldId {
        FieldId::new(value)
    }

    fn grant(name: &str, entries: Vec<PermissionEntry>) -> AccessGrant {
        AccessGrant::new(
            AccessGrantId::new(),
            name,
            PermissionMatrix::from_entries(entries),
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    fn entry(
        module: ModuleName,
        actions: &[&str],
        restricted: &[(&str, &[&str])],
    ) -> PermissionEntry {
        PermissionEntry::new(
            module,
            actions.iter().copied().map(ActionId::from).collect(),
            restricted
                .iter()
                .map(|(action, fields)| {
                    (
                        ActionId::from(*action),
                        fields.iter().copied().map(FieldId::from).collect(),
                    )
                })
                .collect(),
        )
    }

    fn role_for(grants: &[&AccessGrant]) -> Role {
        Role::new(
            RoleId::new(),
            "Members",
            grants.iter().map(|grant| grant.id()),
            None,
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn unrestricted_grant_lifts_field_restriction() {
        let restricted = grant(
            "Restricted viewer",
            vec![entry(task(), &["VIEW"], &[("VIEW", &["salary"])])],
        );
        let open = grant("Editor", vec![entry(task(), &["VIEW", "DELETE"], &[])]);
        let role = role_for(&[&restricted, &open]);

        let effective = resolve_role(&role, &[restricted, open]);

        assert_eq!(
            effective.granted_actions(&task()),
            BTreeSet::from([action("DELETE"), action("VIEW")])
        );
        assert!(effective.restricted_fields(&task(), &action("VIEW")).is_empty());
        assert!(!is_field_restricted(
            &effective,
            &task(),
            &action("VIEW"),
            &field("salary")
        ));
    }

    #[test]
    fn restriction_shared_by_every_grant_survives() {
        let left = grant(
            "Left",
            vec![entry(task(), &["VIEW"], &[("VIEW", &["salary", "estimate"])])],
        );
        let right = grant(
            "Right",
            vec![entry(task(), &["VIEW"], &[("VIEW", &["salary", "owner"])])],
        );
        let role = role_for(&[&left, &right]);

        let effective = resolve_role(&role, &[left, right]);

        assert_eq!(
            effective.restricted_fields(&task(), &action("VIEW")),
            BTreeSet::from([field("salary")])
        );
    }

    #[test]
    fn grants_without_the_action_do_not_lift_restrictions() {
        let viewer = grant(
            "Viewer",
            vec![entry(task(), &["VIEW"], &[("VIEW", &["salary"])])],
        );
        let creator = grant("Creator", vec![entry(task(), &["CREATE"], &[])]);
        let role = role_for(&[&viewer, &creator]);

        let effective = resolve_role(&role, &[viewer, creator]);

        assert!(effective.is_field_restricted(&task(), &action("VIEW"), &field("salary")));
        assert!(can_access(&effective, &task(), &action("CREATE")));
    }

    #[test]
    fn stale_references_are_skipped() {
        let viewer = grant("Viewer", vec![entry(task(), &["VIEW"], &[])]);
        let stale_id = AccessGrantId::new();
        let role = Role::new(RoleId::new(), "Members", [viewer.id(), stale_id], None)
            .unwrap_or_else(|_| unreachable!());
        let grants = [viewer];

        let effective = resolve_role(&role, &grants);
        let expected = resolve_role(&role.with_access_ids([grants[0].id()]), &grants);

        assert_eq!(effective, expected);
        assert_eq!(missing_access_ids(&role, &grants), vec![stale_id]);
    }

    #[test]
    fn unreferenced_grants_are_ignored() {
        let viewer = grant("Viewer", vec![entry(task(), &["VIEW"], &[])]);
        let admin = grant("Admin", vec![entry(task(), &["DELETE"], &[])]);
        let role = role_for(&[&viewer]);

        let effective = resolve_role(&role, &[viewer, admin]);

        assert!(effective.can_access(&task(), &action("VIEW")));
        assert!(!effective.can_access(&task(), &action("DELETE")));
    }

    #[test]
    fn empty_role_resolves_to_nothing() {
        let role = role_for(&[]);
        let effective = resolve_role(&role, &[]);

        assert!(effective.is_empty());
        assert!(!effective.can_access(&task(), &action("VIEW")));
        assert!(!effective.is_field_restricted(&task(), &action("VIEW"), &field("salary")));
    }

    #[test]
    fn ungranted_action_reports_no_restriction() {
        let viewer = grant(
            "Viewer",
            vec![entry(task(), &["VIEW"], &[("VIEW", &["salary"])])],
        );
        let role = role_for(&[&viewer]);
        let effective = resolve_role(&role, &[viewer]);

        assert!(!effective.is_field_restricted(&task(), &action("UPDATE"), &field("salary")));
        assert!(
            effective
                .module(&task())
                .is_some_and(|permissions| permissions.restricted_fields_by_action().len() == 1)
        );
    }

    fn entry_strategy() -> impl Strategy<Value = PermissionEntry> {
        let names = || prop::sample::subsequence(vec!["VIEW", "CREATE", "UPDATE"], 0..=3);
        let fields = || prop::sample::subsequence(vec!["salary", "owner"], 0..=2);
        (
            prop::sample::select(vec!["Task", "Project"]),
            names(),
            prop::collection::vec((prop::sample::select(vec!["VIEW", "UPDATE"]), fields()), 0..3),
        )
            .prop_map(|(module, actions, restricted)| {
                PermissionEntry::new(
                    ModuleName::new(module),
                    actions.into_iter().map(ActionId::from).collect(),
                    restricted
                        .into_iter()
                        .map(|(action, fields)| {
                            (
                                ActionId::from(action),
                                fields.into_iter().map(FieldId::from).collect(),
                            )
                        })
                        .collect::<BTreeMap<_, _>>(),
                )
            })
    }

    fn grants_strategy() -> impl Strategy<Value = Vec<AccessGrant>> {
        prop::collection::vec(prop::collection::vec(entry_strategy(), 0..3), 0..4).prop_map(
            |grants| {
                grants
                    .into_iter()
                    .enumerate()
                    .map(|(index, entries)| grant(&format!("Grant {index}"), entries))
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn granted_actions_are_the_union_of_grants(grants in grants_strategy()) {
            let role = role_for(&grants.iter().collect::<Vec<_>>());
            let effective = resolve_role(&role, &grants);

            for grant in &grants {
                for entry in grant.matrix().entries() {
                    for action in entry.actions() {
                        prop_assert!(effective.can_access(entry.module(), action));
                    }
                }
            }

            for (module, permissions) in effective.modules() {
                for action in permissions.granted_actions() {
                    prop_assert!(grants.iter().any(|grant| grant.matrix().has_action(module, action)));
                }
            }
        }

        #[test]
        fn restrictions_hold_in_every_contributing_grant(grants in grants_strategy()) {
            let role = role_for(&grants.iter().collect::<Vec<_>>());
            let effective = resolve_role(&role, &grants);

            for (module, permissions) in effective.modules() {
                for (action, fields) in permissions.restricted_fields_by_action() {
                    prop_assert!(permissions.granted_actions().contains(action));
                    for field in fields {
                        for grant in &grants {
                            if grant.matrix().has_action(module, action) {
                                prop_assert!(grant.matrix().has_field(module, action, field));
                            }
                        }
                    }
                }
            }
        }
    }
}
