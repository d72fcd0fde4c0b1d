//! ListAttendanceHandler - attendance rows visible to the caller.

use chrono::NaiveDate;

use crate::application::{AttendanceFilter, PolicyGate};
use crate::domain::classroom::{AttendanceRecord, PortalError};
use crate::domain::foundation::UserId;

#[derive(Debug, Clone)]
pub struct ListAttendanceQuery {
    pub user_id: UserId,
    pub date: Option<NaiveDate>,
    pub student_id: Option<UserId>,
}

pub struct ListAttendanceHandler {
    gate: PolicyGate,
}

impl ListAttendanceHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    pub async fn handle(
        &self,
        query: ListAttendanceQuery,
    ) -> Result<Vec<AttendanceRecord>, PortalError> {
        let caller = self.gate.caller(query.user_id).await?;
        self.gate
            .select_attendance(
                &caller,
                AttendanceFilter {
                    date: query.date,
                    student_id: query.student_id,
                },
            )
            .await
    }
}
