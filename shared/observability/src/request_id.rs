//! Request id propagation.
//!
//! The id is taken from the inbound `x-request-id` header when a caller (a
//! gateway or another service) already assigned one, and generated otherwise.

use actix_web::{http::header::HeaderMap, HttpMessage, HttpRequest};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upper bound on accepted inbound ids; longer values are replaced.
const MAX_REQUEST_ID_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
            .map(|v| Self(v.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request id stored by the logging middleware, or a fresh one when the
/// middleware is not mounted.
pub fn get_request_id(req: &HttpRequest) -> RequestId {
    req.extensions()
        .get::<RequestId>()
        .cloned()
        .unwrap_or_else(RequestId::generate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_str(value).unwrap(),
        );
        headers
    }

    #[test]
    fn test_inbound_id_is_kept() {
        let id = RequestId::from_headers(&headers_with("req-123"));
        assert_eq!(id.as_str(), "req-123");
    }

    #[test]
    fn test_missing_or_oversized_id_is_generated() {
        let generated = RequestId::from_headers(&HeaderMap::new());
        assert!(Uuid::parse_str(generated.as_str()).is_ok());

        let oversized = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        let replaced = RequestId::from_headers(&headers_with(&oversized));
        assert_ne!(replaced.as_str(), oversized);
        assert!(Uuid::parse_str(replaced.as_str()).is_ok());
    }
}
