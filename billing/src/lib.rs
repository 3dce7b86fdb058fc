//! Subscription plan catalog service.
//!
//! Serves `GET /api/subscriptions/plans` from an injected
//! [`PlanCatalogService`], plus a health check and (optionally) the bundled
//! front end.

pub mod errors;
pub mod handlers;
pub mod services;

use actix_web::web;
use std::path::PathBuf;
use std::sync::Arc;

pub use errors::ServiceError;
pub use services::{CatalogError, PlanCatalogService};

pub const SERVICE_NAME: &str = "billing-service";

/// Everything the HTTP application needs, built once at startup and shared
/// by all workers.
#[derive(Clone)]
pub struct AppState {
    pub plans: Arc<dyn PlanCatalogService>,
    pub catalog_source: &'static str,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(plans: Arc<dyn PlanCatalogService>, catalog_source: &'static str) -> Self {
        Self {
            plans,
            catalog_source,
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }
}

/// Registers app data and all routes. The SPA, when enabled, is mounted last
/// so it only sees paths no other route claimed.
pub fn configure_app(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::from(state.plans.clone()))
        .app_data(web::Data::new(handlers::health::HealthInfo {
            catalog_source: state.catalog_source,
        }))
        .configure(handlers::plans::configure_plan_routes)
        .route("/health", web::get().to(handlers::health::health_check));

    if let Some(dir) = &state.static_dir {
        cfg.service(handlers::spa::spa_service(dir));
    }
}
