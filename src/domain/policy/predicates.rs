//! Row predicates, one per table and operation.
//!
//! A predicate sees the caller and one candidate row, nothing else. Rows that
//! need data from another table (attendance needs the student's class) are
//! evaluated through a joined row type that the store fills in.

use crate::domain::classroom::{AttendanceRecord, Class, Post, Profile, UserRole};
use crate::domain::foundation::{AuthorizationResult, ClassId};
use std::fmt;

use super::Caller;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Select => "select",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Profiles,
    Classes,
    Posts,
    Attendance,
    Roster,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Profiles => "profiles",
            Table::Classes => "classes",
            Table::Posts => "posts",
            Table::Attendance => "attendance",
            Table::Roster => "roster",
        }
    }
}

/// A row that can be checked against the caller.
pub trait RowPolicy {
    const TABLE: Table;

    fn row_id(&self) -> String;

    /// `Ok(())` if `caller` may perform `op` on this row, else the reason.
    fn check(&self, caller: &Caller, op: Operation) -> Result<(), String>;
}

/// Runs the predicate and packages the decision for logging.
pub fn evaluate<R: RowPolicy + ?Sized>(caller: &Caller, op: Operation, row: &R) -> AuthorizationResult {
    match row.check(caller, op) {
        Ok(()) => AuthorizationResult::granted(R::TABLE.as_str(), row.row_id(), caller.id().to_string()),
        Err(reason) => AuthorizationResult::denied(
            R::TABLE.as_str(),
            row.row_id(),
            caller.id().to_string(),
            format!("{} on {}: {}", op, R::TABLE.as_str(), reason),
        ),
    }
}

/// Shorthand for `evaluate(..).is_granted()`.
pub fn permits<R: RowPolicy + ?Sized>(caller: &Caller, op: Operation, row: &R) -> bool {
    row.check(caller, op).is_ok()
}

fn no_policy(op: Operation) -> Result<(), String> {
    Err(format!("no {} policy exists", op))
}

/// Both sides present and equal. A missing class never matches.
fn same_class(a: Option<ClassId>, b: Option<ClassId>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

impl RowPolicy for Profile {
    const TABLE: Table = Table::Profiles;

    fn row_id(&self) -> String {
        self.id().to_string()
    }

    fn check(&self, caller: &Caller, op: Operation) -> Result<(), String> {
        match op {
            Operation::Select | Operation::Update => {
                if self.id() == caller.id() {
                    Ok(())
                } else {
                    Err("profile belongs to another user".to_string())
                }
            }
            Operation::Insert | Operation::Delete => no_policy(op),
        }
    }
}

impl RowPolicy for Class {
    const TABLE: Table = Table::Classes;

    fn row_id(&self) -> String {
        self.id().to_string()
    }

    fn check(&self, caller: &Caller, op: Operation) -> Result<(), String> {
        match op {
            Operation::Select => {
                if same_class(caller.class_id(), Some(self.id())) {
                    Ok(())
                } else {
                    Err("caller is not a member of this class".to_string())
                }
            }
            _ => no_policy(op),
        }
    }
}

impl RowPolicy for Post {
    const TABLE: Table = Table::Posts;

    fn row_id(&self) -> String {
        self.id().to_string()
    }

    fn check(&self, caller: &Caller, op: Operation) -> Result<(), String> {
        match op {
            Operation::Select => {
                if same_class(caller.class_id(), Some(self.class_id())) {
                    Ok(())
                } else {
                    Err("post belongs to another class".to_string())
                }
            }
            Operation::Insert => {
                if self.teacher_id() != caller.id() {
                    Err("author must be the caller".to_string())
                } else if !caller.is_teacher() {
                    Err("only teachers may post".to_string())
                } else if !same_class(caller.class_id(), Some(self.class_id())) {
                    Err("teacher is not assigned to this class".to_string())
                } else {
                    Ok(())
                }
            }
            Operation::Update | Operation::Delete => {
                if self.teacher_id() == caller.id() {
                    Ok(())
                } else {
                    Err("post was written by someone else".to_string())
                }
            }
        }
    }
}

/// An attendance record joined with its student's current class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRow {
    pub record: AttendanceRecord,
    pub student_class_id: Option<ClassId>,
}

impl AttendanceRow {
    pub fn new(record: AttendanceRecord, student_class_id: Option<ClassId>) -> Self {
        Self {
            record,
            student_class_id,
        }
    }

    fn teacher_of_student(&self, caller: &Caller) -> bool {
        caller.is_teacher() && same_class(caller.class_id(), self.student_class_id)
    }
}

impl RowPolicy for AttendanceRow {
    const TABLE: Table = Table::Attendance;

    fn row_id(&self) -> String {
        self.record.id().to_string()
    }

    fn check(&self, caller: &Caller, op: Operation) -> Result<(), String> {
        match op {
            Operation::Select => {
                if self.record.student_id() == caller.id() || self.teacher_of_student(caller) {
                    Ok(())
                } else {
                    Err("record is neither the caller's nor a student of the caller's class"
                        .to_string())
                }
            }
            Operation::Insert | Operation::Update => {
                if self.teacher_of_student(caller) {
                    Ok(())
                } else {
                    Err("only a teacher of the student's class may mark attendance".to_string())
                }
            }
            Operation::Delete => no_policy(op),
        }
    }
}

/// Read-only roster view over another user's profile.
#[derive(Debug, Clone, Copy)]
pub struct RosterRow<'a>(pub &'a Profile);

impl RowPolicy for RosterRow<'_> {
    const TABLE: Table = Table::Roster;

    fn row_id(&self) -> String {
        self.0.id().to_string()
    }

    fn check(&self, caller: &Caller, op: Operation) -> Result<(), String> {
        match op {
            Operation::Select => {
                if !caller.is_teacher() {
                    Err("only teachers may read a roster".to_string())
                } else if self.0.role() != UserRole::Student {
                    Err("roster lists students only".to_string())
                } else if !same_class(caller.class_id(), self.0.class_id()) {
                    Err("student is in another class".to_string())
                } else {
                    Ok(())
                }
            }
            _ => no_policy(op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classroom::{AttendanceStatus, AuthIdentity};
    use chrono::NaiveDate;
    use serde_json::json;

    fn profile(role: UserRole, class_id: Option<ClassId>) -> Profile {
        let metadata = json!({ "role": role.as_str() });
        let identity = AuthIdentity::new("someone@school.test", Some(metadata)).unwrap();
        let mut profile = Profile::bootstrap(&identity);
        profile.assign_class(class_id);
        profile
    }

    fn caller_for(profile: &Profile) -> Caller {
        Caller::new(profile.id(), Some(profile.clone()))
    }

    fn record_for(student: &Profile) -> AttendanceRow {
        AttendanceRow::new(
            AttendanceRecord::mark(
                student.id(),
                NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
                AttendanceStatus::Present,
            ),
            student.class_id(),
        )
    }

    #[test]
    fn profile_is_self_only() {
        let me = profile(UserRole::Student, None);
        let other = profile(UserRole::Student, None);
        let caller = caller_for(&me);

        assert!(permits(&caller, Operation::Select, &me));
        assert!(permits(&caller, Operation::Update, &me));
        assert!(!permits(&caller, Operation::Select, &other));
        assert!(!permits(&caller, Operation::Delete, &me));
    }

    #[test]
    fn class_visible_to_members_only() {
        let class = Class::new("Class 10A").unwrap();
        let member = profile(UserRole::Student, Some(class.id()));
        let outsider = profile(UserRole::Student, None);

        assert!(permits(&caller_for(&member), Operation::Select, &class));
        assert!(!permits(&caller_for(&outsider), Operation::Select, &class));
    }

    #[test]
    fn post_insert_requires_author_role_and_class() {
        let class_id = ClassId::new();
        let teacher = profile(UserRole::Teacher, Some(class_id));
        let student = profile(UserRole::Student, Some(class_id));

        let own = Post::compose(teacher.id(), class_id, "Quiz", "Friday").unwrap();
        let other_class = Post::compose(teacher.id(), ClassId::new(), "Quiz", "Friday").unwrap();
        let by_student = Post::compose(student.id(), class_id, "Quiz", "Friday").unwrap();

        assert!(permits(&caller_for(&teacher), Operation::Insert, &own));
        assert!(!permits(&caller_for(&teacher), Operation::Insert, &other_class));
        assert!(!permits(&caller_for(&student), Operation::Insert, &by_student));
    }

    #[test]
    fn post_insert_for_someone_else_is_denied_even_in_same_class() {
        let class_id = ClassId::new();
        let teacher = profile(UserRole::Teacher, Some(class_id));
        let colleague = profile(UserRole::Teacher, Some(class_id));
        let forged = Post::compose(colleague.id(), class_id, "Quiz", "Friday").unwrap();

        let decision = evaluate(&caller_for(&teacher), Operation::Insert, &forged);

        assert!(decision.is_denied());
        assert!(decision.denial_reason.unwrap().contains("author"));
    }

    #[test]
    fn post_update_and_delete_author_only() {
        let class_id = ClassId::new();
        let author = profile(UserRole::Teacher, Some(class_id));
        let colleague = profile(UserRole::Teacher, Some(class_id));
        let post = Post::compose(author.id(), class_id, "Quiz", "Friday").unwrap();

        assert!(permits(&caller_for(&author), Operation::Delete, &post));
        assert!(!permits(&caller_for(&colleague), Operation::Update, &post));
        assert!(permits(&caller_for(&colleague), Operation::Select, &post));
    }

    #[test]
    fn attendance_student_sees_own_only() {
        let class_id = ClassId::new();
        let me = profile(UserRole::Student, Some(class_id));
        let classmate = profile(UserRole::Student, Some(class_id));

        assert!(permits(&caller_for(&me), Operation::Select, &record_for(&me)));
        assert!(!permits(&caller_for(&me), Operation::Select, &record_for(&classmate)));
        assert!(!permits(&caller_for(&me), Operation::Insert, &record_for(&me)));
    }

    #[test]
    fn attendance_teacher_branch_needs_shared_class() {
        let class_id = ClassId::new();
        let teacher = profile(UserRole::Teacher, Some(class_id));
        let pupil = profile(UserRole::Student, Some(class_id));
        let elsewhere = profile(UserRole::Student, Some(ClassId::new()));
        let unassigned = profile(UserRole::Student, None);
        let caller = caller_for(&teacher);

        for op in [Operation::Select, Operation::Insert, Operation::Update] {
            assert!(permits(&caller, op, &record_for(&pupil)));
            assert!(!permits(&caller, op, &record_for(&elsewhere)));
            assert!(!permits(&caller, op, &record_for(&unassigned)));
        }
    }

    #[test]
    fn unassigned_teacher_matches_no_unassigned_student() {
        let teacher = profile(UserRole::Teacher, None);
        let pupil = profile(UserRole::Student, None);
        assert!(!permits(&caller_for(&teacher), Operation::Insert, &record_for(&pupil)));
    }

    #[test]
    fn attendance_delete_always_denied() {
        let class_id = ClassId::new();
        let teacher = profile(UserRole::Teacher, Some(class_id));
        let pupil = profile(UserRole::Student, Some(class_id));

        assert!(!permits(&caller_for(&teacher), Operation::Delete, &record_for(&pupil)));
        assert!(!permits(&caller_for(&pupil), Operation::Delete, &record_for(&pupil)));
    }

    #[test]
    fn caller_without_profile_sees_only_own_attendance() {
        let pupil = profile(UserRole::Student, Some(ClassId::new()));
        let ghost = Caller::new(pupil.id(), None);

        assert!(permits(&ghost, Operation::Select, &record_for(&pupil)));
        assert!(!permits(&ghost, Operation::Insert, &record_for(&pupil)));
    }

    #[test]
    fn roster_lists_students_of_teachers_class() {
        let class_id = ClassId::new();
        let teacher = profile(UserRole::Teacher, Some(class_id));
        let pupil = profile(UserRole::Student, Some(class_id));
        let colleague = profile(UserRole::Teacher, Some(class_id));

        assert!(permits(&caller_for(&teacher), Operation::Select, &RosterRow(&pupil)));
        assert!(!permits(&caller_for(&teacher), Operation::Select, &RosterRow(&colleague)));
        assert!(!permits(&caller_for(&pupil), Operation::Select, &RosterRow(&pupil)));
    }

    #[test]
    fn evaluate_reports_table_and_ids() {
        let me = profile(UserRole::Student, None);
        let caller = caller_for(&me);

        let decision = evaluate(&caller, Operation::Select, &me);

        assert_eq!(decision.resource_type, "profiles");
        assert_eq!(decision.resource_id, me.id().to_string());
        assert_eq!(decision.user_id, me.id().to_string());
    }
}
