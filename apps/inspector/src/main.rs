//! Tasklane access inspector: prints the effective permissions of a user or role.

#![forbid(unsafe_code)]

mod inspector_config;

use std::sync::Arc;

use clap::Parser;
use tasklane_application::{AccessControlService, CatalogProvider};
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{RoleId, UserId};
use tasklane_infrastructure::{
    AccessSnapshot, InMemoryAccessGrantRepository, InMemoryRoleRepository,
    InMemoryUserRepository, JsonCatalogProvider,
};
use tracing::info;

use crate::inspector_config::{InspectTarget, InspectorConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = InspectorConfig::parse();
    let service = build_service(&config).await?;

    let effective = match config.target {
        InspectTarget::User { id } => {
            service
                .effective_permissions_for_user(UserId::from_uuid(id))
                .await?
        }
        InspectTarget::Role { id } => {
            service
                .resolve_role_permissions(RoleId::from_uuid(id))
                .await?
        }
    };

    info!(
        modules = effective.modules().count(),
        "resolved effective permissions"
    );

    let rendered = serde_json::to_string_pretty(&effective).map_err(|error| {
        AppError::Internal(format!("failed to render effective permissions: {error}"))
    })?;
    println!("{rendered}");

    Ok(())
}

async fn build_service(config: &InspectorConfig) -> AppResult<AccessControlService> {
    let catalog_provider = Arc::new(JsonCatalogProvider::new(config.catalog_path.clone()));
    let catalog = catalog_provider.load_catalog().await?;

    let snapshot = AccessSnapshot::load_from_path(&config.snapshot_path).await?;
    snapshot.validate(&catalog)?;

    let grant_repository = Arc::new(InMemoryAccessGrantRepository::new());
    let role_repository = Arc::new(InMemoryRoleRepository::new());
    let user_repository = Arc::new(InMemoryUserRepository::new());
    snapshot
        .seed(
            grant_repository.as_ref(),
            role_repository.as_ref(),
            user_repository.as_ref(),
        )
        .await?;

    Ok(AccessControlService::new(
        catalog_provider,
        grant_repository,
        role_repository,
        user_repository,
    ))
}
