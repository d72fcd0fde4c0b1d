//! RemoveIdentityHandler - deletes an identity and, by cascade, its profile.

use std::sync::Arc;

use crate::domain::classroom::PortalError;
use crate::domain::foundation::{CommandMetadata, UserId};
use crate::ports::PortalStore;

#[derive(Debug, Clone)]
pub struct RemoveIdentityCommand {
    pub id: UserId,
}

pub struct RemoveIdentityHandler {
    store: Arc<dyn PortalStore>,
}

impl RemoveIdentityHandler {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    /// Fails with `ConstraintViolation` while posts or attendance still
    /// reference the profile.
    pub async fn handle(
        &self,
        cmd: RemoveIdentityCommand,
        metadata: CommandMetadata,
    ) -> Result<(), PortalError> {
        self.store.delete_identity(&cmd.id).await?;
        tracing::info!(
            user_id = %cmd.id,
            correlation_id = %metadata.correlation_id(),
            "identity removed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::ports::PortalStore;

    #[tokio::test]
    async fn removes_profile_and_nothing_else() {
        let f = Fixture::new().await;
        let keep = f.user("keep@school.test", "student", Some(f.class_a)).await;
        let gone = f.user("gone@school.test", "student", Some(f.class_a)).await;

        RemoveIdentityHandler::new(f.store_arc())
            .handle(RemoveIdentityCommand { id: gone }, CommandMetadata::service())
            .await
            .unwrap();

        assert!(f.store.find_profile(&gone).await.unwrap().is_none());
        assert!(f.store.find_profile(&keep).await.unwrap().is_some());
        assert_eq!(f.store.list_classes().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unknown_identity_is_not_found() {
        let f = Fixture::new().await;
        let result = RemoveIdentityHandler::new(f.store_arc())
            .handle(RemoveIdentityCommand { id: UserId::new() }, CommandMetadata::service())
            .await;
        assert!(matches!(result, Err(PortalError::NotFound(_))));
    }
}
