//! HTTP routes for attendance endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    attendance_summary, delete_attendance, list_attendance, mark_attendance, AttendanceHandlers,
};

pub fn attendance_routes(handlers: AttendanceHandlers) -> Router {
    Router::new()
        .route(
            "/",
            get(list_attendance)
                .put(mark_attendance)
                .delete(delete_attendance),
        )
        .route("/summary", get(attendance_summary))
        .with_state(handlers)
}
