//! GetDashboardHandler - role-specific landing view.
//!
//! Students see their class feed, own attendance and a summary. Teachers see
//! the class feed, the roster and the attendance grid for one date.

use chrono::NaiveDate;
use serde::Serialize;

use crate::application::{AttendanceFilter, PolicyGate};
use crate::domain::classroom::{
    attendance_grid, AttendanceGridRow, AttendanceRecord, AttendanceSummary, Class, PortalError,
    Post, Profile, RosterEntry,
};
use crate::domain::foundation::{Timestamp, UserId};

#[derive(Debug, Clone)]
pub struct GetDashboardQuery {
    pub user_id: UserId,
    /// Grid date for teachers; today when absent.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    Student {
        profile: Profile,
        class: Option<Class>,
        posts: Vec<Post>,
        attendance: Vec<AttendanceRecord>,
        summary: AttendanceSummary,
    },
    Teacher {
        profile: Profile,
        class: Option<Class>,
        posts: Vec<Post>,
        roster: Vec<RosterEntry>,
        date: NaiveDate,
        grid: Vec<AttendanceGridRow>,
    },
}

pub struct GetDashboardHandler {
    gate: PolicyGate,
}

impl GetDashboardHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    pub async fn handle(&self, query: GetDashboardQuery) -> Result<Dashboard, PortalError> {
        let caller = self.gate.caller(query.user_id).await?;
        let profile = self.gate.select_profile(&caller, query.user_id).await?;
        let class = self.gate.select_classes(&caller).await?.into_iter().next();
        let posts = self.gate.select_posts(&caller).await?;

        if !profile.is_teacher() {
            let attendance = self
                .gate
                .select_attendance(
                    &caller,
                    AttendanceFilter {
                        date: None,
                        student_id: Some(caller.id()),
                    },
                )
                .await?;
            let summary = AttendanceSummary::from_records(&attendance);
            return Ok(Dashboard::Student {
                profile,
                class,
                posts,
                attendance,
                summary,
            });
        }

        let date = query.date.unwrap_or_else(Timestamp::today);
        let roster = self.gate.select_roster(&caller).await?;
        let records = self
            .gate
            .select_attendance(
                &caller,
                AttendanceFilter {
                    date: Some(date),
                    student_id: None,
                },
            )
            .await?;
        let grid = attendance_grid(&roster, &records, date);

        Ok(Dashboard::Teacher {
            profile,
            class,
            posts,
            roster,
            date,
            grid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classroom::AttendanceStatus;
    use crate::application::handlers::test_support::Fixture;
    use crate::ports::PortalStore;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 7).unwrap()
    }

    #[tokio::test]
    async fn student_dashboard_carries_summary() {
        let f = Fixture::new().await;
        let pupil = f.user("p@school.test", "student", Some(f.class_a)).await;
        f.store
            .upsert_attendance(&AttendanceRecord::mark(pupil, day(), AttendanceStatus::Present))
            .await
            .unwrap();

        let dashboard = GetDashboardHandler::new(f.gate.clone())
            .handle(GetDashboardQuery { user_id: pupil, date: None })
            .await
            .unwrap();

        match dashboard {
            Dashboard::Student { class, attendance, summary, .. } => {
                assert_eq!(class.map(|c| c.id()), Some(f.class_a));
                assert_eq!(attendance.len(), 1);
                assert_eq!(summary.present, 1);
            }
            other => panic!("expected student dashboard, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn teacher_grid_lists_every_student_on_roster() {
        let f = Fixture::new().await;
        let teacher = f.user("t@school.test", "teacher", Some(f.class_a)).await;
        let marked = f.user("m@school.test", "student", Some(f.class_a)).await;
        f.user("u@school.test", "student", Some(f.class_a)).await;
        f.user("elsewhere@school.test", "student", Some(f.class_b)).await;
        f.store
            .upsert_attendance(&AttendanceRecord::mark(marked, day(), AttendanceStatus::Absent))
            .await
            .unwrap();

        let dashboard = GetDashboardHandler::new(f.gate.clone())
            .handle(GetDashboardQuery { user_id: teacher, date: Some(day()) })
            .await
            .unwrap();

        let Dashboard::Teacher { grid, date, .. } = dashboard else {
            panic!("expected teacher dashboard");
        };
        assert_eq!(date, day());
        assert_eq!(grid.len(), 2);
        let row = grid.iter().find(|r| r.student_id == marked).unwrap();
        assert_eq!(row.status, Some(AttendanceStatus::Absent));
        assert!(grid.iter().any(|r| r.status.is_none()));
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let f = Fixture::new().await;
        let result = GetDashboardHandler::new(f.gate.clone())
            .handle(GetDashboardQuery { user_id: UserId::new(), date: None })
            .await;
        assert!(matches!(result, Err(PortalError::NotFound(_))));
    }
}
