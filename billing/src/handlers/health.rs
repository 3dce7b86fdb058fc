use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::SERVICE_NAME;

pub struct HealthInfo {
    pub catalog_source: &'static str,
}

// Liveness only: the catalog backend is not called, so an outage there
// does not get the process restarted.
pub async fn health_check(info: web::Data<HealthInfo>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "catalog_source": info.catalog_source,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
