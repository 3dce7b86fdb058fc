use actix_web::{
    http::{
        header::{self, CacheControl, CacheDirective, HeaderValue},
        StatusCode,
    },
    HttpResponse, HttpResponseBuilder, ResponseError,
};
use plancat_models::ErrorBody;
use std::fmt;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const NOT_FOUND: &str = "Not Found";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

/// Errors that leave a handler. The payload is for logs only and is never
/// rendered into the response body.
#[derive(Debug)]
pub enum ServiceError {
    ServiceUnavailable(String),
    NotFound(String),
    /// Resource exists but only answers the listed methods.
    MethodNotAllowed { allow: &'static str },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServiceError::MethodNotAllowed { allow } => write!(f, "Method not allowed, expected {}", allow),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ServiceUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        let message = match self {
            ServiceError::ServiceUnavailable(_) => INTERNAL_SERVER_ERROR,
            ServiceError::NotFound(_) => NOT_FOUND,
            ServiceError::MethodNotAllowed { allow } => {
                builder.insert_header((header::ALLOW, HeaderValue::from_static(*allow)));
                METHOD_NOT_ALLOWED
            }
        };
        no_store(&mut builder).json(ErrorBody::new(message))
    }
}

/// Marks a response as never cacheable, by browsers or intermediaries.
pub fn no_store(builder: &mut HttpResponseBuilder) -> &mut HttpResponseBuilder {
    builder
        .insert_header(CacheControl(vec![
            CacheDirective::NoStore,
            CacheDirective::NoCache,
            CacheDirective::MustRevalidate,
            CacheDirective::MaxAge(0),
        ]))
        .insert_header((header::PRAGMA, HeaderValue::from_static("no-cache")))
}
