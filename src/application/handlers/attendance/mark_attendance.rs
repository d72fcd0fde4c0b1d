//! MarkAttendanceHandler - upsert one student's status for one date.
//!
//! Marking the same (student, date) again overwrites the status; the row id
//! stays the same. Concurrent marks resolve last writer wins.

use chrono::NaiveDate;

use crate::application::PolicyGate;
use crate::domain::classroom::{AttendanceRecord, AttendanceStatus, PortalError};
use crate::domain::foundation::{CommandMetadata, UserId};

#[derive(Debug, Clone)]
pub struct MarkAttendanceCommand {
    pub user_id: UserId,
    pub student_id: UserId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

pub struct MarkAttendanceHandler {
    gate: PolicyGate,
}

impl MarkAttendanceHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    pub async fn handle(
        &self,
        cmd: MarkAttendanceCommand,
        metadata: CommandMetadata,
    ) -> Result<AttendanceRecord, PortalError> {
        let caller = self.gate.caller(cmd.user_id).await?;
        let record = AttendanceRecord::mark(cmd.student_id, cmd.date, cmd.status);
        let stored = self.gate.upsert_attendance(&caller, record).await?;

        tracing::info!(
            student_id = %cmd.student_id,
            date = %cmd.date,
            status = %cmd.status,
            correlation_id = %metadata.correlation_id(),
            "attendance marked"
        );
        Ok(stored)
    }
}
