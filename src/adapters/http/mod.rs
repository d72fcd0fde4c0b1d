//! HTTP adapters - REST API implementations.
//!
//! `/api/*` routes are bearer-authenticated and run as the caller through
//! the policy gate. `/service/*` routes require the service key.

pub mod attendance;
pub mod classroom;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod posts;
pub mod profile;
pub mod request_context;
pub mod service;

use std::sync::Arc;

use axum::{http::StatusCode, middleware as axum_middleware, routing::get, Json, Router};
use secrecy::SecretString;
use serde_json::json;

use crate::application::PolicyGate;
use crate::ports::{PortalStore, SessionValidator};

pub use error::{portal_error_response, ErrorResponse};
pub use extract::{ApiJson, ApiPath, ApiQuery, ApiRejection};
pub use middleware::{AuthState, RequireAuth, ServiceKey};

/// Client routes, mounted under `/api`.
pub fn api_router(store: Arc<dyn PortalStore>, validator: Arc<dyn SessionValidator>) -> Router {
    let gate = PolicyGate::new(store);
    Router::new()
        .nest("/profile", profile::profile_routes(profile::ProfileHandlers::new(gate.clone())))
        .merge(classroom::classroom_routes(classroom::ClassroomHandlers::new(gate.clone())))
        .nest("/posts", posts::post_routes(posts::PostHandlers::new(gate.clone())))
        .nest(
            "/attendance",
            attendance::attendance_routes(attendance::AttendanceHandlers::new(gate.clone())),
        )
        .nest(
            "/dashboard",
            dashboard::dashboard_routes(dashboard::DashboardHandlers::new(gate)),
        )
        .layer(axum_middleware::from_fn_with_state(
            validator,
            middleware::auth_middleware,
        ))
}

/// Service routes, mounted under `/service`.
pub fn service_router(store: Arc<dyn PortalStore>, service_key: SecretString) -> Router {
    service::service_routes(service::ServiceHandlers::new(store)).layer(
        axum_middleware::from_fn_with_state(
            ServiceKey::new(service_key),
            middleware::service_key_middleware,
        ),
    )
}

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Complete application router without transport layers (tracing, CORS,
/// timeouts), which `main` adds.
pub fn portal_router(
    store: Arc<dyn PortalStore>,
    validator: Arc<dyn SessionValidator>,
    service_key: SecretString,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router(store.clone(), validator))
        .nest("/service", service_router(store, service_key))
}
