mod inputs;
mod repositories;

pub use inputs::{CreateAccessGrantInput, CreateRoleInput, UpdateAccessGrantInput};
pub use repositories::{
    AccessGrantRepository, CatalogProvider, RoleRepository, UserRoleRepository,
};
