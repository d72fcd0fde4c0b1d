//! GetRosterHandler - students of the calling teacher's class.

use crate::application::PolicyGate;
use crate::domain::classroom::{PortalError, RosterEntry};
use crate::domain::foundation::UserId;

#[derive(Debug, Clone)]
pub struct GetRosterQuery {
    pub user_id: UserId,
}

pub struct GetRosterHandler {
    gate: PolicyGate,
}

impl GetRosterHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    /// Empty for students and for teachers without a class.
    pub async fn handle(&self, query: GetRosterQuery) -> Result<Vec<RosterEntry>, PortalError> {
        let caller = self.gate.caller(query.user_id).await?;
        self.gate.select_roster(&caller).await
    }
}
