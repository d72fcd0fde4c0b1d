//! AssignClassHandler - places a profile in a class, or removes it from one.

use std::sync::Arc;

use crate::domain::classroom::{PortalError, Profile};
use crate::domain::foundation::{ClassId, CommandMetadata, UserId};
use crate::ports::PortalStore;

#[derive(Debug, Clone)]
pub struct AssignClassCommand {
    pub profile_id: UserId,
    pub class_id: Option<ClassId>,
}

pub struct AssignClassHandler {
    store: Arc<dyn PortalStore>,
}

impl AssignClassHandler {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: AssignClassCommand,
        metadata: CommandMetadata,
    ) -> Result<Profile, PortalError> {
        if let Some(class_id) = cmd.class_id {
            if self.store.find_class(&class_id).await?.is_none() {
                return Err(PortalError::not_found(format!("class {}", class_id)));
            }
        }

        let mut profile = self
            .store
            .find_profile(&cmd.profile_id)
            .await?
            .ok_or_else(|| PortalError::not_found(format!("profile {}", cmd.profile_id)))?;

        profile.assign_class(cmd.class_id);
        self.store.update_profile(&profile).await?;

        tracing::info!(
            user_id = %cmd.profile_id,
            class_id = ?cmd.class_id,
            correlation_id = %metadata.correlation_id(),
            "class assigned"
        );
        Ok(profile)
    }
}
