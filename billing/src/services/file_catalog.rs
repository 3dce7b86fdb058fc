use async_trait::async_trait;
use plancat_models::PlanCatalog;
use std::path::PathBuf;
use tracing::debug;

use super::plan_catalog::{parse_catalog, CatalogError, PlanCatalogService};

/// Serves an exported catalog document. The file is re-read on every call so
/// edits show up on the next request.
pub struct FilePlanCatalog {
    path: PathBuf,
}

impl FilePlanCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PlanCatalogService for FilePlanCatalog {
    async fn get_subscription_plans(&self) -> Result<PlanCatalog, CatalogError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let catalog = parse_catalog(&bytes)?;

        debug!(path = %self.path.display(), plans = catalog.len(), "Loaded subscription plans from file");
        Ok(catalog)
    }
}
