//! Classroom domain: classes, profiles, posts and attendance.
//!
//! Entities here validate their own fields but know nothing about who is
//! allowed to see or change them. Access rules live in `domain::policy`.

mod attendance;
mod class;
mod errors;
mod identity;
mod post;
mod profile;

pub use attendance::{
    attendance_grid, AttendanceGridRow, AttendanceRecord, AttendanceStatus, AttendanceSummary,
};
pub use class::{Class, MAX_CLASS_NAME_LENGTH, SEED_CLASS_NAMES};
pub use errors::PortalError;
pub use identity::{AuthIdentity, MAX_EMAIL_LENGTH};
pub use post::{Post, MAX_POST_TITLE_LENGTH};
pub use profile::{Profile, RosterEntry, UserRole, MAX_PROFILE_NAME_LENGTH};
