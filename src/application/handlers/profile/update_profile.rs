//! UpdateProfileHandler - owner edits their display name.
//!
//! Role and class are not user-editable; class assignment is a service
//! operation (`AssignClassHandler`).

use crate::application::PolicyGate;
use crate::domain::classroom::{PortalError, Profile};
use crate::domain::foundation::{CommandMetadata, UserId};

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub name: String,
}

pub struct UpdateProfileHandler {
    gate: PolicyGate,
}

impl UpdateProfileHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<Profile, PortalError> {
        let caller = self.gate.caller(cmd.user_id).await?;
        let mut profile = self.gate.select_profile(&caller, cmd.user_id).await?;

        profile.rename(&cmd.name)?;
        self.gate.update_profile(&caller, &profile).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            correlation_id = %metadata.correlation_id(),
            "profile renamed"
        );
        Ok(profile)
    }
}
