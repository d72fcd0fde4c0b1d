//! DeleteAttendanceHandler - attendance is never deleted by callers.

use chrono::NaiveDate;

use crate::application::PolicyGate;
use crate::domain::classroom::PortalError;
use crate::domain::foundation::UserId;

#[derive(Debug, Clone)]
pub struct DeleteAttendanceCommand {
    pub user_id: UserId,
    pub student_id: UserId,
    pub date: NaiveDate,
}

pub struct DeleteAttendanceHandler {
    gate: PolicyGate,
}

impl DeleteAttendanceHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    /// Always fails: `Forbidden` for a visible row, `NotFound` otherwise.
    pub async fn handle(&self, cmd: DeleteAttendanceCommand) -> Result<(), PortalError> {
        let caller = self.gate.caller(cmd.user_id).await?;
        self.gate
            .delete_attendance(&caller, cmd.student_id, cmd.date)
            .await
    }
}
