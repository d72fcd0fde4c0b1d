//! RegisterIdentityHandler - creates an auth identity and bootstraps its
//! profile in one store call.
//!
//! The profile takes its name from metadata `name` (falling back to the
//! email) and its role from metadata `role`; anything other than exactly
//! `"teacher"` yields a student. New profiles have no class.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::classroom::{AuthIdentity, PortalError, Profile};
use crate::domain::foundation::{CommandMetadata, UserId};
use crate::ports::PortalStore;

#[derive(Debug, Clone)]
pub struct RegisterIdentityCommand {
    pub email: String,
    pub metadata: Option<Value>,
    /// Supplied by an external identity provider; generated when absent.
    pub id: Option<UserId>,
}

pub struct RegisterIdentityHandler {
    store: Arc<dyn PortalStore>,
}

impl RegisterIdentityHandler {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: RegisterIdentityCommand,
        metadata: CommandMetadata,
    ) -> Result<Profile, PortalError> {
        let identity = match cmd.id {
            Some(id) => AuthIdentity::with_id(id, &cmd.email, cmd.metadata)?,
            None => AuthIdentity::new(&cmd.email, cmd.metadata)?,
        };
        let profile = Profile::bootstrap(&identity);

        self.store.insert_identity(&identity, &profile).await?;

        tracing::info!(
            user_id = %identity.id(),
            role = %profile.role(),
            correlation_id = %metadata.correlation_id(),
            source = metadata.source().unwrap_or("unknown"),
            "identity registered"
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPortalStore;
    use crate::domain::classroom::UserRole;
    use serde_json::json;

    fn handler(store: &InMemoryPortalStore) -> RegisterIdentityHandler {
        RegisterIdentityHandler::new(Arc::new(store.clone()))
    }

    fn cmd(email: &str, metadata: Option<Value>) -> RegisterIdentityCommand {
        RegisterIdentityCommand {
            email: email.into(),
            metadata,
            id: None,
        }
    }

    #[tokio::test]
    async fn no_metadata_gives_student_named_by_email() {
        let store = InMemoryPortalStore::seeded();

        let profile = handler(&store)
            .handle(cmd("new@school.test", None), CommandMetadata::service())
            .await
            .unwrap();

        assert_eq!(profile.role(), UserRole::Student);
        assert_eq!(profile.name(), "new@school.test");
        assert_eq!(profile.class_id(), None);
        assert_eq!(store.profile_count().await, 1);
    }

    #[tokio::test]
    async fn teacher_metadata_is_honored() {
        let store = InMemoryPortalStore::seeded();

        let profile = handler(&store)
            .handle(
                cmd("t@school.test", Some(json!({ "name": "Ms. Lee", "role": "teacher" }))),
                CommandMetadata::service(),
            )
            .await
            .unwrap();

        assert_eq!(profile.role(), UserRole::Teacher);
        assert_eq!(profile.name(), "Ms. Lee");
    }

    #[tokio::test]
    async fn unknown_role_falls_back_to_student() {
        let store = InMemoryPortalStore::seeded();

        let profile = handler(&store)
            .handle(
                cmd("x@school.test", Some(json!({ "role": "admin" }))),
                CommandMetadata::service(),
            )
            .await
            .unwrap();

        assert_eq!(profile.role(), UserRole::Student);
    }

    #[tokio::test]
    async fn duplicate_id_is_a_constraint_violation() {
        let store = InMemoryPortalStore::seeded();
        let id = UserId::new();
        let mut first = cmd("a@school.test", None);
        first.id = Some(id);
        let mut second = cmd("b@school.test", None);
        second.id = Some(id);

        handler(&store).handle(first, CommandMetadata::service()).await.unwrap();
        let result = handler(&store).handle(second, CommandMetadata::service()).await;

        assert!(matches!(result, Err(PortalError::ConstraintViolation(_))));
        assert_eq!(store.profile_count().await, 1);
    }

    #[tokio::test]
    async fn invalid_email_is_a_validation_failure() {
        let store = InMemoryPortalStore::seeded();
        let result = handler(&store)
            .handle(cmd("not-an-email", None), CommandMetadata::service())
            .await;
        assert!(matches!(result, Err(PortalError::ValidationFailed { .. })));
    }
}
