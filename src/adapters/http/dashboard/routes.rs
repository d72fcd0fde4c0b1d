//! HTTP routes for the dashboard endpoint.

use axum::{routing::get, Router};

use super::handlers::{get_dashboard, DashboardHandlers};

pub fn dashboard_routes(handlers: DashboardHandlers) -> Router {
    Router::new()
        .route("/", get(get_dashboard))
        .with_state(handlers)
}
