//! HTTP adapter for the caller's class and its roster.

mod dto;
mod handlers;
mod routes;

pub use dto::{ClassResponse, RosterEntryResponse};
pub use handlers::ClassroomHandlers;
pub use routes::classroom_routes;
