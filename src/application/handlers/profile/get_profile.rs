//! GetProfileHandler - the caller's own profile.

use crate::application::PolicyGate;
use crate::domain::classroom::{PortalError, Profile};
use crate::domain::foundation::UserId;

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

pub struct GetProfileHandler {
    gate: PolicyGate,
}

impl GetProfileHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<Profile, PortalError> {
        let caller = self.gate.caller(query.user_id).await?;
        self.gate.select_profile(&caller, query.user_id).await
    }
}
