//! HTTP adapter for the caller's own profile.

mod dto;
mod handlers;
mod routes;

pub use dto::{ProfileResponse, UpdateProfileRequest};
pub use handlers::ProfileHandlers;
pub use routes::profile_routes;
