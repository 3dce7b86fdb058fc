use async_trait::async_trait;
use plancat_config::CatalogSource;
use plancat_models::{PlanCatalog, SubscriptionPlan};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::{FilePlanCatalog, UpstreamPlanCatalog};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("subscription service unavailable: {0}")]
    Unavailable(String),

    #[error("subscription service responded with status {status}")]
    Upstream { status: u16 },

    #[error("malformed plan catalog: {0}")]
    Malformed(String),

    #[error("failed to read plan catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only access to the current catalog of subscription plans.
///
/// Implementations are shared across workers and called once per request.
#[async_trait]
pub trait PlanCatalogService: Send + Sync {
    async fn get_subscription_plans(&self) -> Result<PlanCatalog, CatalogError>;
}

/// Builds the catalog service for the configured source.
pub fn build_plan_catalog(source: &CatalogSource) -> Result<Arc<dyn PlanCatalogService>, CatalogError> {
    let service: Arc<dyn PlanCatalogService> = match source {
        CatalogSource::Upstream { url, timeout } => {
            Arc::new(UpstreamPlanCatalog::new(url.clone(), *timeout)?)
        }
        CatalogSource::File { path } => Arc::new(FilePlanCatalog::new(path.clone())),
    };
    Ok(service)
}

/// Parses a catalog document: a JSON array whose elements are all objects.
pub fn parse_catalog(bytes: &[u8]) -> Result<PlanCatalog, CatalogError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(CatalogError::Malformed(format!(
                "expected a JSON array of plans, got {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            SubscriptionPlan::try_from(item)
                .map_err(|e| CatalogError::Malformed(format!("plan at index {}: {}", index, e)))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
