//! HTTP adapter for privileged operations behind the service key.

mod dto;
mod handlers;
mod routes;

pub use dto::{AssignClassRequest, RegisterIdentityRequest};
pub use handlers::ServiceHandlers;
pub use routes::service_routes;
