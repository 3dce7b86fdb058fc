use async_trait::async_trait;
use plancat_models::PlanCatalog;
use reqwest::{header::ACCEPT, Client};
use std::time::Duration;
use tracing::debug;

use super::plan_catalog::{parse_catalog, CatalogError, PlanCatalogService};

/// Proxies catalog reads to the subscription service over HTTP.
pub struct UpstreamPlanCatalog {
    client: Client,
    url: String,
}

impl UpstreamPlanCatalog {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Unavailable(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PlanCatalogService for UpstreamPlanCatalog {
    async fn get_subscription_plans(&self) -> Result<PlanCatalog, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CatalogError::Unavailable(format!("request to {} timed out", self.url))
                } else {
                    CatalogError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Upstream { status: status.as_u16() });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        let catalog = parse_catalog(&body)?;

        debug!(url = %self.url, plans = catalog.len(), "Fetched subscription plans from upstream");
        Ok(catalog)
    }
}
