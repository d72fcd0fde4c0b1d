//! HTTP routes for class and roster endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_class, get_roster, ClassroomHandlers};

/// Mounted at the `/api` root: `/class` and `/roster`.
pub fn classroom_routes(handlers: ClassroomHandlers) -> Router {
    Router::new()
        .route("/class", get(get_class))
        .route("/roster", get(get_roster))
        .with_state(handlers)
}
