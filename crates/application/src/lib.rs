//! Application services and ports.

#![forbid(unsafe_code)]

mod access_control_service;
mod access_grant_editor;
mod access_ports;

pub use access_control_service::AccessControlService;
pub use access_grant_editor::AccessGrantEditor;
pub use access_ports::{
    AccessGrantRepository, CatalogProvider, CreateAccessGrantInput, CreateRoleInput,
    RoleRepository, UpdateAccessGrantInput, UserRoleRepository,
};
