//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod access_snapshot;
mod in_memory_access_grant_repository;
mod in_memory_role_repository;
mod in_memory_user_repository;
mod json_catalog_provider;

pub use access_snapshot::AccessSnapshot;
pub use in_memory_access_grant_repository::InMemoryAccessGrantRepository;
pub use in_memory_role_repository::InMemoryRoleRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use json_catalog_provider::{JsonCatalogProvider, StaticCatalogProvider, parse_catalog};
