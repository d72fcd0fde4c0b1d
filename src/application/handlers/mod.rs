//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Caller
//! facing handlers go through the [`PolicyGate`](crate::application::PolicyGate);
//! `identity` handlers act with service credentials on the store directly.

pub mod attendance;
pub mod classroom;
pub mod dashboard;
pub mod identity;
pub mod post;
pub mod profile;

#[cfg(test)]
pub(crate) mod test_support;

pub use attendance::{
    AttendanceSummaryHandler, AttendanceSummaryQuery, DeleteAttendanceCommand,
    DeleteAttendanceHandler, ListAttendanceHandler, ListAttendanceQuery, MarkAttendanceCommand,
    MarkAttendanceHandler,
};
pub use classroom::{GetClassHandler, GetClassQuery, GetRosterHandler, GetRosterQuery};
pub use dashboard::{Dashboard, GetDashboardHandler, GetDashboardQuery};
pub use identity::{
    AssignClassCommand, AssignClassHandler, ListClassesHandler, RegisterIdentityCommand,
    RegisterIdentityHandler, RemoveIdentityCommand, RemoveIdentityHandler,
};
pub use post::{
    CreatePostCommand, CreatePostHandler, DeletePostCommand, DeletePostHandler, ListPostsHandler,
    ListPostsQuery, UpdatePostCommand, UpdatePostHandler,
};
pub use profile::{GetProfileHandler, GetProfileQuery, UpdateProfileCommand, UpdateProfileHandler};
