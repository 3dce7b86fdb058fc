use actix_cors::Cors;
use actix_web::{App, HttpServer};
use plancat_billing::{configure_app, services::build_plan_catalog, AppState, SERVICE_NAME};
use plancat_config::{AppConfig, CatalogSource};
use plancat_observability::{init_tracing, observability, TracingConfig};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before the subscriber so LOG_FORMAT/RUST_LOG from it apply.
    let dotenv_result = dotenv::dotenv();

    init_tracing(TracingConfig::for_service(SERVICE_NAME))?;

    match dotenv_result {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    let config = AppConfig::from_env()?;

    match &config.catalog {
        CatalogSource::Upstream { url, timeout } => {
            tracing::info!("[Billing Service] Proxying subscription plans to {} (timeout {:?})", url, timeout);
        }
        CatalogSource::File { path } => {
            tracing::info!("[Billing Service] Serving subscription plans from {}", path.display());
        }
    }

    let plans = build_plan_catalog(&config.catalog)?;
    let mut state = AppState::new(plans, config.catalog.kind());

    match (config.static_site_dir(), &config.static_dir) {
        (Some(dir), _) => {
            tracing::info!("[Billing Service] Serving front end from {}", dir.display());
            state = state.with_static_dir(dir.clone());
        }
        (None, Some(dir)) => {
            tracing::warn!(
                "[Billing Service] STATIC_DIR {} is missing or StaticSite is disabled - front end not served",
                dir.display()
            );
        }
        (None, None) => {}
    }

    let enabled = config.feature_toggles.enabled_features();
    if !enabled.is_empty() {
        tracing::info!("[Billing Service] Enabled features: {}", enabled.join(", "));
    }

    tracing::info!("[Billing Service] Starting on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .wrap(observability(SERVICE_NAME))
            .configure(|cfg| configure_app(cfg, &state))
    })
    .bind((config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
