//! Policy gate - query interception for every caller-facing operation.
//!
//! The store is privileged and applies no access rules. The gate loads the
//! caller's own profile, narrows the candidate rows the way an index would,
//! and then runs every candidate through `domain::policy`:
//!
//! - reads drop rows the SELECT predicate rejects; a single hidden row is
//!   reported as `NotFound`, never `Forbidden`
//! - writes are rejected with `Forbidden` when the predicate is false
//!
//! Every decision is logged through `tracing`.
//!
//! Attendance writes re-check the student's class inside the store write.
//! Post updates and deletes do not: a teacher moved to another class while
//! the request is in flight can still edit their own post once.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::classroom::{
    AttendanceRecord, Class, PortalError, Post, Profile, RosterEntry,
};
use crate::domain::foundation::{
    AttendanceId, AuthorizationResult, ClassId, PostId, UserId,
};
use crate::domain::policy::{evaluate, AttendanceRow, Caller, Operation, RosterRow, RowPolicy};
use crate::ports::PortalStore;

/// Narrowing for attendance reads. Both fields are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub date: Option<NaiveDate>,
    pub student_id: Option<UserId>,
}

#[derive(Clone)]
pub struct PolicyGate {
    store: Arc<dyn PortalStore>,
}

impl PolicyGate {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    /// Builds the caller context: identity plus its own profile, if any.
    pub async fn caller(&self, user_id: UserId) -> Result<Caller, PortalError> {
        let profile = self.store.find_profile(&user_id).await?;
        if profile.is_none() {
            tracing::warn!(user_id = %user_id, "caller has no profile row");
        }
        Ok(Caller::new(user_id, profile))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Decision helpers
    // ════════════════════════════════════════════════════════════════════════

    fn log(op: Operation, decision: &AuthorizationResult) {
        if decision.granted {
            tracing::debug!(
                operation = %op,
                resource_type = decision.resource_type,
                resource_id = %decision.resource_id,
                user_id = %decision.user_id,
                "policy granted"
            );
        } else {
            tracing::debug!(
                operation = %op,
                resource_type = decision.resource_type,
                resource_id = %decision.resource_id,
                user_id = %decision.user_id,
                reason = decision.denial_reason.as_deref().unwrap_or(""),
                "policy denied"
            );
        }
    }

    fn allowed<R: RowPolicy + ?Sized>(caller: &Caller, op: Operation, row: &R) -> bool {
        let decision = evaluate(caller, op, row);
        Self::log(op, &decision);
        decision.granted
    }

    fn visible<R: RowPolicy>(caller: &Caller, rows: Vec<R>) -> Vec<R> {
        rows.into_iter()
            .filter(|row| Self::allowed(caller, Operation::Select, row))
            .collect()
    }

    fn require<R: RowPolicy + ?Sized>(caller: &Caller, op: Operation, row: &R) -> Result<(), PortalError> {
        let decision = evaluate(caller, op, row);
        Self::log(op, &decision);
        if decision.is_denied() {
            tracing::info!(
                operation = %op,
                resource_type = decision.resource_type,
                resource_id = %decision.resource_id,
                user_id = %decision.user_id,
                "write rejected by policy"
            );
        }
        decision.into_result().map_err(PortalError::from)
    }

    fn reveal<R: RowPolicy>(caller: &Caller, row: Option<R>, what: String) -> Result<R, PortalError> {
        match row {
            Some(row) if Self::allowed(caller, Operation::Select, &row) => Ok(row),
            _ => Err(PortalError::not_found(what)),
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Profiles
    // ════════════════════════════════════════════════════════════════════════

    pub async fn select_profile(&self, caller: &Caller, id: UserId) -> Result<Profile, PortalError> {
        let row = self.store.find_profile(&id).await?;
        Self::reveal(caller, row, format!("profile {}", id))
    }

    /// Writes `profile` if the caller may update both the stored row and the
    /// new row.
    pub async fn update_profile(&self, caller: &Caller, profile: &Profile) -> Result<(), PortalError> {
        let stored = self.select_profile(caller, profile.id()).await?;
        Self::require(caller, Operation::Update, &stored)?;
        Self::require(caller, Operation::Update, profile)?;
        self.store.update_profile(profile).await?;
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Classes
    // ════════════════════════════════════════════════════════════════════════

    pub async fn select_classes(&self, caller: &Caller) -> Result<Vec<Class>, PortalError> {
        let rows = self.store.list_classes().await?;
        Ok(Self::visible(caller, rows))
    }

    pub async fn select_class(&self, caller: &Caller, id: ClassId) -> Result<Class, PortalError> {
        let row = self.store.find_class(&id).await?;
        Self::reveal(caller, row, format!("class {}", id))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Roster
    // ════════════════════════════════════════════════════════════════════════

    /// Students sharing the caller's class, as id/name pairs.
    pub async fn select_roster(&self, caller: &Caller) -> Result<Vec<RosterEntry>, PortalError> {
        let Some(class_id) = caller.class_id() else {
            return Ok(Vec::new());
        };
        let profiles = self.store.list_profiles_in_class(&class_id).await?;
        Ok(profiles
            .iter()
            .filter(|p| Self::allowed(caller, Operation::Select, &RosterRow(p)))
            .map(Profile::roster_entry)
            .collect())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Posts
    // ════════════════════════════════════════════════════════════════════════

    /// Posts of the caller's class, newest first.
    pub async fn select_posts(&self, caller: &Caller) -> Result<Vec<Post>, PortalError> {
        let Some(class_id) = caller.class_id() else {
            return Ok(Vec::new());
        };
        let rows = self.store.list_posts_in_class(&class_id).await?;
        Ok(Self::visible(caller, rows))
    }

    pub async fn select_post(&self, caller: &Caller, id: PostId) -> Result<Post, PortalError> {
        let row = self.store.find_post(&id).await?;
        Self::reveal(caller, row, format!("post {}", id))
    }

    pub async fn insert_post(&self, caller: &Caller, post: &Post) -> Result<(), PortalError> {
        Self::require(caller, Operation::Insert, post)?;
        self.store.insert_post(post).await?;
        Ok(())
    }

    pub async fn update_post(&self, caller: &Caller, post: &Post) -> Result<(), PortalError> {
        let stored = self.select_post(caller, post.id()).await?;
        Self::require(caller, Operation::Update, &stored)?;
        self.store.update_post(post).await?;
        Ok(())
    }

    pub async fn delete_post(&self, caller: &Caller, id: PostId) -> Result<(), PortalError> {
        let stored = self.select_post(caller, id).await?;
        Self::require(caller, Operation::Delete, &stored)?;
        self.store.delete_post(&id).await?;
        Ok(())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Attendance
    // ════════════════════════════════════════════════════════════════════════

    /// Attendance rows visible to the caller, newest date first.
    ///
    /// Candidates are the caller's own rows plus, for a teacher with a class,
    /// the rows of students currently in that class.
    pub async fn select_attendance(
        &self,
        caller: &Caller,
        filter: AttendanceFilter,
    ) -> Result<Vec<AttendanceRecord>, PortalError> {
        let mut candidates = match filter.student_id {
            Some(student_id) => self.store.list_attendance_for_student(&student_id).await?,
            None => {
                let mut rows = self.store.list_attendance_for_student(&caller.id()).await?;
                if let (true, Some(class_id)) = (caller.is_teacher(), caller.class_id()) {
                    rows.extend(
                        self.store
                            .list_attendance_for_class(&class_id, filter.date)
                            .await?,
                    );
                }
                rows
            }
        };

        if let Some(date) = filter.date {
            candidates.retain(|row| row.record.date() == date);
        }

        let mut seen: HashSet<AttendanceId> = HashSet::new();
        candidates.retain(|row| seen.insert(row.record.id()));

        let mut records: Vec<AttendanceRecord> = Self::visible(caller, candidates)
            .into_iter()
            .map(|row| row.record)
            .collect();
        records.sort_by(|a, b| {
            b.date()
                .cmp(&a.date())
                .then_with(|| a.student_id().cmp(&b.student_id()))
        });
        Ok(records)
    }

    /// Insert-or-update keyed on `(student_id, date)`.
    ///
    /// An existing row must pass the UPDATE predicate, a new one the INSERT
    /// predicate. The write only lands if the student is still in the class
    /// the decision was made against.
    pub async fn upsert_attendance(
        &self,
        caller: &Caller,
        record: AttendanceRecord,
    ) -> Result<AttendanceRecord, PortalError> {
        let student_class_id = self
            .store
            .find_profile(&record.student_id())
            .await?
            .and_then(|p| p.class_id());

        let existing = self
            .store
            .find_attendance(&record.student_id(), record.date())
            .await?;

        match existing {
            Some(stored) => {
                Self::require(caller, Operation::Update, &stored)?;
                let mut updated = stored.record.clone();
                updated.set_status(record.status());
                Self::require(
                    caller,
                    Operation::Update,
                    &AttendanceRow::new(updated, student_class_id),
                )?;
            }
            None => {
                Self::require(
                    caller,
                    Operation::Insert,
                    &AttendanceRow::new(record.clone(), student_class_id),
                )?;
            }
        }

        Ok(self
            .store
            .upsert_attendance_in_class(&record, student_class_id)
            .await?)
    }

    /// There is no DELETE predicate for attendance: a visible row yields
    /// `Forbidden`, an invisible one `NotFound`.
    pub async fn delete_attendance(
        &self,
        caller: &Caller,
        student_id: UserId,
        date: NaiveDate,
    ) -> Result<(), PortalError> {
        let row = self.store.find_attendance(&student_id, date).await?;
        let row = Self::reveal(
            caller,
            row,
            format!("attendance of {} on {}", student_id, date),
        )?;
        Self::require(caller, Operation::Delete, &row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPortalStore;
    use crate::domain::classroom::{AttendanceStatus, AuthIdentity};
    use serde_json::json;

    struct Fixture {
        store: InMemoryPortalStore,
        gate: PolicyGate,
        class_a: ClassId,
        class_b: ClassId,
    }

    impl Fixture {
        async fn new() -> Self {
            let store = InMemoryPortalStore::seeded();
            let classes = store.list_classes().await.unwrap();
            Self {
                gate: PolicyGate::new(Arc::new(store.clone())),
                store,
                class_a: classes[0].id(),
                class_b: classes[1].id(),
            }
        }

        async fn user(&self, email: &str, role: &str, class_id: Option<ClassId>) -> Caller {
            let identity = AuthIdentity::new(email, Some(json!({ "role": role }))).unwrap();
            let mut profile = Profile::bootstrap(&identity);
            self.store.insert_identity(&identity, &profile).await.unwrap();
            profile.assign_class(class_id);
            self.store.update_profile(&profile).await.unwrap();
            self.gate.caller(identity.id()).await.unwrap()
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    fn mark(student: &Caller, d: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord::mark(student.id(), day(d), status)
    }

    #[tokio::test]
    async fn caller_sees_only_own_class() {
        let f = Fixture::new().await;
        let pupil = f.user("p@school.test", "student", Some(f.class_a)).await;

        let classes = f.gate.select_classes(&pupil).await.unwrap();

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].id(), f.class_a);
        assert!(matches!(
            f.gate.select_class(&pupil, f.class_b).await,
            Err(PortalError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn unassigned_caller_sees_no_class_and_no_posts() {
        let f = Fixture::new().await;
        let pupil = f.user("p@school.test", "student", None).await;

        assert!(f.gate.select_classes(&pupil).await.unwrap().is_empty());
        assert!(f.gate.select_posts(&pupil).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn other_profiles_are_not_found() {
        let f = Fixture::new().await;
        let a = f.user("a@school.test", "student", Some(f.class_a)).await;
        let b = f.user("b@school.test", "student", Some(f.class_a)).await;

        assert!(f.gate.select_profile(&a, a.id()).await.is_ok());
        assert!(matches!(
            f.gate.select_profile(&a, b.id()).await,
            Err(PortalError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn teacher_posts_into_own_class_only() {
        let f = Fixture::new().await;
        let teacher = f.user("t@school.test", "teacher", Some(f.class_a)).await;

        let ok = Post::compose(teacher.id(), f.class_a, "Quiz", "Friday").unwrap();
        f.gate.insert_post(&teacher, &ok).await.unwrap();

        let elsewhere = Post::compose(teacher.id(), f.class_b, "Quiz", "Friday").unwrap();
        assert!(matches!(
            f.gate.insert_post(&teacher, &elsewhere).await,
            Err(PortalError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn colleague_cannot_edit_or_delete_post() {
        let f = Fixture::new().await;
        let author = f.user("t1@school.test", "teacher", Some(f.class_a)).await;
        let colleague = f.user("t2@school.test", "teacher", Some(f.class_a)).await;
        let post = Post::compose(author.id(), f.class_a, "Quiz", "Friday").unwrap();
        f.gate.insert_post(&author, &post).await.unwrap();

        assert!(matches!(
            f.gate.delete_post(&colleague, post.id()).await,
            Err(PortalError::Forbidden(_))
        ));
        f.gate.delete_post(&author, post.id()).await.unwrap();
        assert!(f.gate.select_posts(&colleague).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn post_of_other_class_is_not_found() {
        let f = Fixture::new().await;
        let author = f.user("t1@school.test", "teacher", Some(f.class_a)).await;
        let outsider = f.user("p@school.test", "student", Some(f.class_b)).await;
        let post = Post::compose(author.id(), f.class_a, "Quiz", "Friday").unwrap();
        f.gate.insert_post(&author, &post).await.unwrap();

        assert!(matches!(
            f.gate.select_post(&outsider, post.id()).await,
            Err(PortalError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn upsert_twice_leaves_one_absent_row() {
        let f = Fixture::new().await;
        let teacher = f.user("t@school.test", "teacher", Some(f.class_a)).await;
        let pupil = f.user("p@school.test", "student", Some(f.class_a)).await;

        let first = f
            .gate
            .upsert_attendance(&teacher, mark(&pupil, 7, AttendanceStatus::Present))
            .await
            .unwrap();
        let second = f
            .gate
            .upsert_attendance(&teacher, mark(&pupil, 7, AttendanceStatus::Absent))
            .await
            .unwrap();

        assert_eq!(first.id(), second.id());
        let rows = f
            .gate
            .select_attendance(&pupil, AttendanceFilter::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status(), AttendanceStatus::Absent);
    }

    #[tokio::test]
    async fn teacher_cannot_mark_student_of_other_class() {
        let f = Fixture::new().await;
        let teacher = f.user("t@school.test", "teacher", Some(f.class_a)).await;
        let outsider = f.user("p@school.test", "student", Some(f.class_b)).await;

        let err = f
            .gate
            .upsert_attendance(&teacher, mark(&outsider, 7, AttendanceStatus::Present))
            .await
            .unwrap_err();

        assert!(matches!(err, PortalError::Forbidden(_)));
        assert_eq!(f.store.attendance_count().await, 0);
    }

    #[tokio::test]
    async fn student_cannot_mark_self() {
        let f = Fixture::new().await;
        let pupil = f.user("p@school.test", "student", Some(f.class_a)).await;

        assert!(matches!(
            f.gate
                .upsert_attendance(&pupil, mark(&pupil, 7, AttendanceStatus::Present))
                .await,
            Err(PortalError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn student_sees_only_own_attendance() {
        let f = Fixture::new().await;
        let teacher = f.user("t@school.test", "teacher", Some(f.class_a)).await;
        let a = f.user("a@school.test", "student", Some(f.class_a)).await;
        let b = f.user("b@school.test", "student", Some(f.class_a)).await;
        for student in [&a, &b] {
            f.gate
                .upsert_attendance(&teacher, mark(student, 8, AttendanceStatus::Present))
                .await
                .unwrap();
        }

        let own = f
            .gate
            .select_attendance(&a, AttendanceFilter::default())
            .await
            .unwrap();
        assert!(own.iter().all(|r| r.student_id() == a.id()));
        assert_eq!(own.len(), 1);

        let peeking = f
            .gate
            .select_attendance(
                &a,
                AttendanceFilter {
                    student_id: Some(b.id()),
                    date: None,
                },
            )
            .await
            .unwrap();
        assert!(peeking.is_empty());
    }

    #[tokio::test]
    async fn teacher_sees_class_attendance_for_date() {
        let f = Fixture::new().await;
        let teacher = f.user("t@school.test", "teacher", Some(f.class_a)).await;
        let a = f.user("a@school.test", "student", Some(f.class_a)).await;
        f.gate
            .upsert_attendance(&teacher, mark(&a, 8, AttendanceStatus::Present))
            .await
            .unwrap();
        f.gate
            .upsert_attendance(&teacher, mark(&a, 9, AttendanceStatus::Absent))
            .await
            .unwrap();

        let rows = f
            .gate
            .select_attendance(
                &teacher,
                AttendanceFilter {
                    date: Some(day(9)),
                    student_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status(), AttendanceStatus::Absent);
    }

    #[tokio::test]
    async fn attendance_delete_is_always_forbidden() {
        let f = Fixture::new().await;
        let teacher = f.user("t@school.test", "teacher", Some(f.class_a)).await;
        let pupil = f.user("p@school.test", "student", Some(f.class_a)).await;
        f.gate
            .upsert_attendance(&teacher, mark(&pupil, 7, AttendanceStatus::Present))
            .await
            .unwrap();

        assert!(matches!(
            f.gate.delete_attendance(&teacher, pupil.id(), day(7)).await,
            Err(PortalError::Forbidden(_))
        ));
        assert_eq!(f.store.attendance_count().await, 1);
    }

    #[tokio::test]
    async fn roster_lists_students_for_teacher_only() {
        let f = Fixture::new().await;
        let teacher = f.user("t@school.test", "teacher", Some(f.class_a)).await;
        let pupil = f.user("p@school.test", "student", Some(f.class_a)).await;
        f.user("q@school.test", "student", Some(f.class_b)).await;

        let roster = f.gate.select_roster(&teacher).await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, pupil.id());

        assert!(f.gate.select_roster(&pupil).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn profile_update_by_owner_only() {
        let f = Fixture::new().await;
        let a = f.user("a@school.test", "student", None).await;
        let b = f.user("b@school.test", "student", None).await;

        let mut own = a.profile().unwrap().clone();
        own.rename("Alex").unwrap();
        f.gate.update_profile(&a, &own).await.unwrap();

        let mut others = b.profile().unwrap().clone();
        others.rename("Hacked").unwrap();
        assert!(matches!(
            f.gate.update_profile(&a, &others).await,
            Err(PortalError::NotFound(_))
        ));
    }
}
