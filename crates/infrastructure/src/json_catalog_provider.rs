use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tasklane_application::CatalogProvider;
use tasklane_core::{AppError, AppResult};
use tasklane_domain::GrantCatalog;
use tracing::debug;

/// Catalog provider reading a JSON document from disk on every load.
#[derive(Debug, Clone)]
pub struct JsonCatalogProvider {
    path: PathBuf,
}

impl JsonCatalogProvider {
    /// Creates a provider for the given catalog file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the catalog file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

#[async_trait]
impl CatalogProvider for JsonCatalogProvider {
    async fn load_catalog(&self) -> AppResult<GrantCatalog> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to read catalog '{}': {error}",
                    self.path.display()
                ))
            })?;

        let catalog = parse_catalog(raw.as_str())?;
        debug!(
            path = %self.path.display(),
            modules = catalog.modules().count(),
            "loaded grant catalog"
        );

        Ok(catalog)
    }
}

/// Catalog provider serving a catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogProvider {
    catalog: GrantCatalog,
}

impl StaticCatalogProvider {
    /// Creates a provider for an already loaded catalog.
    #[must_use]
    pub fn new(catalog: GrantCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalogProvider {
    async fn load_catalog(&self) -> AppResult<GrantCatalog> {
        Ok(self.catalog.clone())
    }
}

/// Parses a catalog JSON document.
pub fn parse_catalog(raw: &str) -> AppResult<GrantCatalog> {
    serde_json::from_str(raw)
        .map_err(|error| AppError::Validation(format!("invalid catalog document: {error}")))
}
