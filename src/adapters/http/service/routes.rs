//! HTTP routes for service-key endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    assign_class, list_classes, register_identity, remove_identity, ServiceHandlers,
};

pub fn service_routes(handlers: ServiceHandlers) -> Router {
    Router::new()
        .route("/identities", post(register_identity))
        .route("/identities/:id", delete(remove_identity))
        .route("/profiles/:id/class", put(assign_class))
        .route("/classes", get(list_classes))
        .with_state(handlers)
}
