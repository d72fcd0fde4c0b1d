//! HTTP routes for post endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{create_post, delete_post, list_posts, update_post, PostHandlers};

pub fn post_routes(handlers: PostHandlers) -> Router {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", patch(update_post).delete(delete_post))
        .with_state(handlers)
}
