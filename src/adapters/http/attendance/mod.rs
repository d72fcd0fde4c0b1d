//! HTTP adapter for attendance records.

mod dto;
mod handlers;
mod routes;

pub use dto::{AttendanceResponse, MarkAttendanceRequest};
pub use handlers::AttendanceHandlers;
pub use routes::attendance_routes;
