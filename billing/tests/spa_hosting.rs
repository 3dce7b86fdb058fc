use actix_web::{http::header, http::StatusCode, test, App};
use async_trait::async_trait;
use std::sync::Arc;

use plancat_billing::{configure_app, AppState, CatalogError, PlanCatalogService};
use plancat_models::PlanCatalog;

struct EmptyCatalog;

#[async_trait]
impl PlanCatalogService for EmptyCatalog {
    async fn get_subscription_plans(&self) -> Result<PlanCatalog, CatalogError> {
        Ok(Vec::new())
    }
}

fn bundle() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<!doctype html><div id=\"root\"></div>").unwrap();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets").join("app.js"), "console.log('plans')").unwrap();
    dir
}

#[actix_web::test]
async fn test_serves_bundle_files_and_index() {
    let dir = bundle();
    let state = AppState::new(Arc::new(EmptyCatalog), "file").with_static_dir(dir.path());
    let app = test::init_service(App::new().configure(|cfg| configure_app(cfg, &state))).await;

    let req = test::TestRequest::get().uri("/assets/app.js").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "console.log('plans')");

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(String::from_utf8_lossy(&test::read_body(resp).await).contains("root"));
}

#[actix_web::test]
async fn test_client_routes_fall_back_to_index() {
    let dir = bundle();
    let state = AppState::new(Arc::new(EmptyCatalog), "file").with_static_dir(dir.path());
    let app = test::init_service(App::new().configure(|cfg| configure_app(cfg, &state))).await;

    let req = test::TestRequest::get().uri("/pricing/annual").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "no-cache");
    assert!(String::from_utf8_lossy(&test::read_body(resp).await).contains("root"));
}

#[actix_web::test]
async fn test_missing_asset_is_not_found() {
    let dir = bundle();
    let state = AppState::new(Arc::new(EmptyCatalog), "file").with_static_dir(dir.path());
    let app = test::init_service(App::new().configure(|cfg| configure_app(cfg, &state))).await;

    let req = test::TestRequest::get().uri("/assets/missing.css").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(test::read_body(resp).await, r#"{"error":"Not Found"}"#);
}

#[actix_web::test]
async fn test_api_routes_take_precedence_over_bundle() {
    let dir = bundle();
    let state = AppState::new(Arc::new(EmptyCatalog), "file").with_static_dir(dir.path());
    let app = test::init_service(App::new().configure(|cfg| configure_app(cfg, &state))).await;

    let req = test::TestRequest::get().uri("/api/subscriptions/plans").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "[]");

    let req = test::TestRequest::get().uri("/api/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(test::read_body(resp).await, r#"{"error":"Not Found"}"#);
}
