//! Attendance records and the read models built from them.

use crate::domain::foundation::{AttendanceId, Timestamp, UserId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::RosterEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// One student's status on one calendar day.
///
/// At most one record exists per `(student_id, date)`; marking again
/// overwrites the status and keeps the original id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    id: AttendanceId,
    student_id: UserId,
    date: NaiveDate,
    status: AttendanceStatus,
    created_at: Timestamp,
}

impl AttendanceRecord {
    /// A fresh mark, not yet reconciled with any existing row.
    pub fn mark(student_id: UserId, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id: AttendanceId::new(),
            student_id,
            date,
            status,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a record from persistence.
    pub fn reconstitute(
        id: AttendanceId,
        student_id: UserId,
        date: NaiveDate,
        status: AttendanceStatus,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            student_id,
            date,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> AttendanceId {
        self.id
    }

    pub fn student_id(&self) -> UserId {
        self.student_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn set_status(&mut self, status: AttendanceStatus) {
        self.status = status;
    }
}

/// Present/absent counts over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub total: u32,
    /// Percentage present, one decimal. `None` when there are no records.
    pub rate_percent: Option<f64>,
}

impl AttendanceSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        let (mut present, mut absent) = (0u32, 0u32);
        for record in records {
            match record.status() {
                AttendanceStatus::Present => present += 1,
                AttendanceStatus::Absent => absent += 1,
            }
        }
        let total = present + absent;
        let rate_percent = (total > 0)
            .then(|| (f64::from(present) * 1000.0 / f64::from(total)).round() / 10.0);

        Self {
            present,
            absent,
            total,
            rate_percent,
        }
    }
}

/// A teacher's marking sheet line for one student on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceGridRow {
    pub student_id: UserId,
    pub name: String,
    pub status: Option<AttendanceStatus>,
    pub record_id: Option<AttendanceId>,
}

/// Lines up roster entries with the records of `date`. Records of other
/// dates or of students not on the roster are ignored.
pub fn attendance_grid(
    roster: &[RosterEntry],
    records: &[AttendanceRecord],
    date: NaiveDate,
) -> Vec<AttendanceGridRow> {
    let by_student: HashMap<UserId, &AttendanceRecord> = records
        .iter()
        .filter(|r| r.date() == date)
        .map(|r| (r.student_id(), r))
        .collect();

    roster
        .iter()
        .map(|entry| {
            let record = by_student.get(&entry.id);
            AttendanceGridRow {
                student_id: entry.id,
                name: entry.name.clone(),
                status: record.map(|r| r.status()),
                record_id: record.map(|r| r.id()),
            }
        })
        .collect()
}
