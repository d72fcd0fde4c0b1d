//! HTTP DTOs for the role-specific dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::adapters::http::attendance::AttendanceResponse;
use crate::adapters::http::classroom::{ClassResponse, RosterEntryResponse};
use crate::adapters::http::posts::PostResponse;
use crate::adapters::http::profile::ProfileResponse;
use crate::application::handlers::dashboard::Dashboard;
use crate::domain::classroom::{AttendanceGridRow, AttendanceSummary};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardParams {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum DashboardResponse {
    Student {
        profile: ProfileResponse,
        class: Option<ClassResponse>,
        posts: Vec<PostResponse>,
        attendance: Vec<AttendanceResponse>,
        summary: AttendanceSummary,
    },
    Teacher {
        profile: ProfileResponse,
        class: Option<ClassResponse>,
        posts: Vec<PostResponse>,
        roster: Vec<RosterEntryResponse>,
        date: NaiveDate,
        grid: Vec<AttendanceGridRow>,
    },
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        match dashboard {
            Dashboard::Student {
                profile,
                class,
                posts,
                attendance,
                summary,
            } => DashboardResponse::Student {
                profile: profile.into(),
                class: class.map(Into::into),
                posts: posts.into_iter().map(Into::into).collect(),
                attendance: attendance.into_iter().map(Into::into).collect(),
                summary,
            },
            Dashboard::Teacher {
                profile,
                class,
                posts,
                roster,
                date,
                grid,
            } => DashboardResponse::Teacher {
                profile: profile.into(),
                class: class.map(Into::into),
                posts: posts.into_iter().map(Into::into).collect(),
                roster: roster.into_iter().map(Into::into).collect(),
                date,
                grid,
            },
        }
    }
}
