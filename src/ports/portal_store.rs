//! Relational store port.
//!
//! The store is privileged: it applies no row-level policy of its own. Every
//! caller-facing path reaches it through `application::PolicyGate`; only the
//! service handlers call it directly.
//!
//! Implementations must enforce the schema constraints:
//! - one identity per id and per email, one profile per identity
//! - foreign keys from profiles to classes, posts/attendance to profiles
//! - `UNIQUE (student_id, date)` on attendance

use crate::domain::classroom::{AttendanceRecord, AuthIdentity, Class, Post, Profile};
use crate::domain::foundation::{ClassId, DomainError, PostId, UserId};
use crate::domain::policy::AttendanceRow;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait PortalStore: Send + Sync {
    // ── identities ──────────────────────────────────────────────────────────

    /// Insert an identity and its bootstrapped profile in one atomic step.
    ///
    /// # Errors
    ///
    /// - `UniqueViolation` if the id or email already exists; nothing is written
    /// - `DatabaseError` on persistence failure
    async fn insert_identity(
        &self,
        identity: &AuthIdentity,
        profile: &Profile,
    ) -> Result<(), DomainError>;

    async fn find_identity(&self, id: &UserId) -> Result<Option<AuthIdentity>, DomainError>;

    /// Delete an identity; its profile goes with it.
    ///
    /// # Errors
    ///
    /// - `IdentityNotFound` if absent
    /// - `ForeignKeyViolation` if posts or attendance still reference the profile
    async fn delete_identity(&self, id: &UserId) -> Result<(), DomainError>;

    // ── classes ─────────────────────────────────────────────────────────────

    /// All classes ordered by name.
    async fn list_classes(&self) -> Result<Vec<Class>, DomainError>;

    async fn find_class(&self, id: &ClassId) -> Result<Option<Class>, DomainError>;

    // ── profiles ────────────────────────────────────────────────────────────

    async fn find_profile(&self, id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Persist name, class and `updated_at`. Role is never written.
    ///
    /// # Errors
    ///
    /// - `ProfileNotFound` if absent
    /// - `ForeignKeyViolation` if `class_id` names no class
    async fn update_profile(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Profiles whose `class_id` is `class_id`, ordered by name.
    async fn list_profiles_in_class(&self, class_id: &ClassId) -> Result<Vec<Profile>, DomainError>;

    // ── posts ───────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// - `ForeignKeyViolation` if the author or class does not exist
    async fn insert_post(&self, post: &Post) -> Result<(), DomainError>;

    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DomainError>;

    /// Persist title and content.
    async fn update_post(&self, post: &Post) -> Result<(), DomainError>;

    async fn delete_post(&self, id: &PostId) -> Result<(), DomainError>;

    /// Posts of a class, newest first.
    async fn list_posts_in_class(&self, class_id: &ClassId) -> Result<Vec<Post>, DomainError>;

    // ── attendance ──────────────────────────────────────────────────────────

    /// Insert, or on `(student_id, date)` conflict overwrite the status of the
    /// existing row. Returns the stored row, whose id is the original one.
    ///
    /// # Errors
    ///
    /// - `ForeignKeyViolation` if the student has no profile
    async fn upsert_attendance(
        &self,
        record: &AttendanceRecord,
    ) -> Result<AttendanceRecord, DomainError>;

    /// Same as [`upsert_attendance`](Self::upsert_attendance), but only while
    /// the student's class is still `class_id`. The class read and the write
    /// happen atomically.
    ///
    /// # Errors
    ///
    /// - `ForeignKeyViolation` if the student has no profile
    /// - `Forbidden` if the student's class changed
    async fn upsert_attendance_in_class(
        &self,
        record: &AttendanceRecord,
        class_id: Option<ClassId>,
    ) -> Result<AttendanceRecord, DomainError>;

    async fn find_attendance(
        &self,
        student_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRow>, DomainError>;

    /// A student's records, newest date first.
    async fn list_attendance_for_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<AttendanceRow>, DomainError>;

    /// Records of students currently in `class_id`, optionally for one date.
    /// Newest date first, then by student.
    async fn list_attendance_for_class(
        &self,
        class_id: &ClassId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRow>, DomainError>;
}
