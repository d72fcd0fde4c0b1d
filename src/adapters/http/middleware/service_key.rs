//! Shared-secret guard for the `/service` routes.
//!
//! Callers present the key in `X-Service-Key`; comparison is constant time.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::adapters::http::error::ErrorResponse;

pub const SERVICE_KEY_HEADER: &str = "x-service-key";

#[derive(Clone)]
pub struct ServiceKey(Arc<SecretString>);

impl ServiceKey {
    pub fn new(key: SecretString) -> Self {
        Self(Arc::new(key))
    }

    /// An empty configured key matches nothing.
    pub fn matches(&self, presented: &str) -> bool {
        let expected = self.0.expose_secret().as_bytes();
        if expected.is_empty() {
            return false;
        }
        expected.ct_eq(presented.as_bytes()).into()
    }
}

impl std::fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceKey([REDACTED])")
    }
}

pub async fn service_key_middleware(
    State(key): State<ServiceKey>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(SERVICE_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match presented {
        Some(value) if key.matches(value) => next.run(request).await,
        _ => {
            tracing::warn!(path = %request.uri().path(), "service request with bad key");
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthorized("Service key required")),
            )
                .into_response()
        }
    }
}
