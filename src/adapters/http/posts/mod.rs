//! HTTP adapter for class announcements.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreatePostRequest, PostResponse, UpdatePostRequest};
pub use handlers::PostHandlers;
pub use routes::post_routes;
