//! Attendance command and query handlers.

mod attendance_summary;
mod delete_attendance;
mod list_attendance;
mod mark_attendance;

pub use attendance_summary::{AttendanceSummaryHandler, AttendanceSummaryQuery};
pub use delete_attendance::{DeleteAttendanceCommand, DeleteAttendanceHandler};
pub use list_attendance::{ListAttendanceHandler, ListAttendanceQuery};
pub use mark_attendance::{MarkAttendanceCommand, MarkAttendanceHandler};
