//! CreatePostHandler - a teacher publishes an announcement.

use crate::application::PolicyGate;
use crate::domain::classroom::{PortalError, Post};
use crate::domain::foundation::{ClassId, CommandMetadata, UserId};

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub user_id: UserId,
    /// Defaults to the caller's own class.
    pub class_id: Option<ClassId>,
    pub title: String,
    pub content: String,
}

pub struct CreatePostHandler {
    gate: PolicyGate,
}

impl CreatePostHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    pub async fn handle(
        &self,
        cmd: CreatePostCommand,
        metadata: CommandMetadata,
    ) -> Result<Post, PortalError> {
        let caller = self.gate.caller(cmd.user_id).await?;
        let class_id = cmd
            .class_id
            .or(caller.class_id())
            .ok_or_else(|| PortalError::forbidden("caller is not assigned to a class"))?;

        let post = Post::compose(cmd.user_id, class_id, &cmd.title, &cmd.content)?;
        self.gate.insert_post(&caller, &post).await?;

        tracing::info!(
            post_id = %post.id(),
            class_id = %class_id,
            correlation_id = %metadata.correlation_id(),
            "post created"
        );
        Ok(post)
    }
}
