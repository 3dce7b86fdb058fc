//! Hosting for the pre-built single-page front end.

use actix_files::{Files, NamedFile};
use actix_web::{
    dev::{fn_service, ServiceRequest, ServiceResponse},
    http::header::{self, HeaderValue},
    ResponseError,
};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::errors::ServiceError;

/// Serves files from `static_dir` at `/`. Unknown extensionless paths get
/// `index.html` so the client-side router can handle them.
pub fn spa_service(static_dir: &Path) -> Files {
    let index = static_dir.join("index.html");

    Files::new("/", static_dir)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            serve_index(req, index.clone())
        }))
}

async fn serve_index(req: ServiceRequest, index: PathBuf) -> Result<ServiceResponse, actix_web::Error> {
    let (req, _) = req.into_parts();

    // Missing assets are real 404s, not routes.
    if has_extension(req.path()) {
        let res = ServiceError::NotFound(req.path().to_string()).error_response();
        return Ok(ServiceResponse::new(req, res));
    }

    match NamedFile::open_async(&index).await {
        Ok(file) => {
            let mut res = file.into_response(&req);
            res.headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
            Ok(ServiceResponse::new(req, res))
        }
        Err(e) => {
            warn!("SPA index {} unavailable: {}", index.display(), e);
            let res = ServiceError::NotFound(index.display().to_string()).error_response();
            Ok(ServiceResponse::new(req, res))
        }
    }
}

fn has_extension(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .map(|segment| segment.contains('.'))
        .unwrap_or(false)
}
