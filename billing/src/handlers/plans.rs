use actix_web::{web, HttpRequest, HttpResponse};
use tracing::error;

use crate::errors::{no_store, ServiceError};
use crate::services::PlanCatalogService;

/// `GET /api/subscriptions/plans`
///
/// Calls the catalog service on every request and returns its result as a
/// bare JSON array. Failures are logged with their cause and rendered as a
/// generic 500.
pub async fn get_subscription_plans(
    service: web::Data<dyn PlanCatalogService>,
) -> Result<HttpResponse, ServiceError> {
    match service.get_subscription_plans().await {
        Ok(plans) => Ok(no_store(&mut HttpResponse::Ok()).json(plans)),
        Err(e) => {
            error!(error = %e, "Error fetching subscription plans: {}", e);
            Err(ServiceError::ServiceUnavailable(e.to_string()))
        }
    }
}

async fn plans_method_not_allowed() -> Result<HttpResponse, ServiceError> {
    Err(ServiceError::MethodNotAllowed { allow: "GET" })
}

async fn api_not_found(req: HttpRequest) -> Result<HttpResponse, ServiceError> {
    Err(ServiceError::NotFound(req.path().to_string()))
}

pub fn configure_plan_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/subscriptions/plans")
                    .route(web::get().to(get_subscription_plans))
                    .default_service(web::to(plans_method_not_allowed)),
            )
            .default_service(web::to(api_not_found)),
    );
}
