//! AttendanceSummaryHandler - present/absent counts for one student.

use crate::application::{AttendanceFilter, PolicyGate};
use crate::domain::classroom::{AttendanceSummary, PortalError};
use crate::domain::foundation::UserId;

#[derive(Debug, Clone)]
pub struct AttendanceSummaryQuery {
    pub user_id: UserId,
    /// Defaults to the caller.
    pub student_id: Option<UserId>,
}

pub struct AttendanceSummaryHandler {
    gate: PolicyGate,
}

impl AttendanceSummaryHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    /// Counts only rows the caller can see; an invisible student yields zeros.
    pub async fn handle(&self, query: AttendanceSummaryQuery) -> Result<AttendanceSummary, PortalError> {
        let caller = self.gate.caller(query.user_id).await?;
        let records = self
            .gate
            .select_attendance(
                &caller,
                AttendanceFilter {
                    date: None,
                    student_id: Some(query.student_id.unwrap_or(query.user_id)),
                },
            )
            .await?;
        Ok(AttendanceSummary::from_records(&records))
    }
}
