//! GetClassHandler - the class the caller belongs to.

use crate::application::PolicyGate;
use crate::domain::classroom::{Class, PortalError};
use crate::domain::foundation::UserId;

#[derive(Debug, Clone)]
pub struct GetClassQuery {
    pub user_id: UserId,
}

pub struct GetClassHandler {
    gate: PolicyGate,
}

impl GetClassHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    /// `NotFound` when the caller has no class.
    pub async fn handle(&self, query: GetClassQuery) -> Result<Class, PortalError> {
        let caller = self.gate.caller(query.user_id).await?;
        self.gate
            .select_classes(&caller)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PortalError::not_found("class for caller"))
    }
}
