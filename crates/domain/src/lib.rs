//! Access-control domain: grant catalog, permission matrices, roles and
//! their resolution into effective permissions.
//!
//! Everything in this crate is synchronous and free of I/O. Catalog, grant,
//! role and user records are supplied by callers; the functions here only
//! transform and query them.

#![forbid(unsafe_code)]

mod access;
mod catalog;
mod effective;
mod identifiers;
mod matrix;
pub mod mutator;
mod resolver;
mod tri_state;
mod user;

pub use access::{AccessGrant, Role};
pub use catalog::{CatalogModule, GrantCatalog};
pub use effective::{EffectivePermissionSet, ModulePermissions, can_access, is_field_restricted};
pub use identifiers::{AccessGrantId, ActionId, FieldId, ModuleName, RoleId, UserId};
pub use matrix::{PermissionEntry, PermissionMatrix};
pub use mutator::{PermissionIntent, set_action, set_all_actions, set_all_fields, set_field};
pub use resolver::{missing_access_ids, resolve_role};
pub use tri_state::{TriState, tri_state};
pub use user::User;
