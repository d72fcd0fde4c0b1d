//! DeletePostHandler - the author removes a post.

use crate::application::PolicyGate;
use crate::domain::classroom::PortalError;
use crate::domain::foundation::{CommandMetadata, PostId, UserId};

#[derive(Debug, Clone)]
pub struct DeletePostCommand {
    pub user_id: UserId,
    pub post_id: PostId,
}

pub struct DeletePostHandler {
    gate: PolicyGate,
}

impl DeletePostHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    pub async fn handle(
        &self,
        cmd: DeletePostCommand,
        metadata: CommandMetadata,
    ) -> Result<(), PortalError> {
        let caller = self.gate.caller(cmd.user_id).await?;
        self.gate.delete_post(&caller, cmd.post_id).await?;

        tracing::info!(
            post_id = %cmd.post_id,
            correlation_id = %metadata.correlation_id(),
            "post deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::classroom::Post;
    use crate::ports::PortalStore;

    #[tokio::test]
    async fn author_deletes_post() {
        let f = Fixture::new().await;
        let teacher = f.user("t@school.test", "teacher", Some(f.class_a)).await;
        let post = Post::compose(teacher, f.class_a, "Quiz", "Friday").unwrap();
        f.store.insert_post(&post).await.unwrap();

        DeletePostHandler::new(f.gate.clone())
            .handle(
                DeletePostCommand { user_id: teacher, post_id: post.id() },
                CommandMetadata::new(teacher),
            )
            .await
            .unwrap();

        assert!(f.store.find_post(&post.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let f = Fixture::new().await;
        let teacher = f.user("t@school.test", "teacher", Some(f.class_a)).await;

        let result = DeletePostHandler::new(f.gate.clone())
            .handle(
                DeletePostCommand { user_id: teacher, post_id: PostId::new() },
                CommandMetadata::new(teacher),
            )
            .await;

        assert!(matches!(result, Err(PortalError::NotFound(_))));
    }
}
