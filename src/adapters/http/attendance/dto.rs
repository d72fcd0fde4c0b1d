//! HTTP DTOs for attendance endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::classroom::{AttendanceRecord, AttendanceStatus};
use crate::domain::foundation::{AttendanceId, Timestamp, UserId};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceListParams {
    pub date: Option<NaiveDate>,
    pub student_id: Option<UserId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryParams {
    pub student_id: Option<UserId>,
}

/// Identifies one record by its natural key.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceKeyParams {
    pub student_id: UserId,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    pub student_id: UserId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceResponse {
    pub id: AttendanceId,
    pub student_id: UserId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: Timestamp,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            id: record.id(),
            student_id: record.student_id(),
            date: record.date(),
            status: record.status(),
            created_at: *record.created_at(),
        }
    }
}
