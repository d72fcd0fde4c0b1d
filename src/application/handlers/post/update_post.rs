//! UpdatePostHandler - the author edits title and/or content.

use crate::application::PolicyGate;
use crate::domain::classroom::{PortalError, Post};
use crate::domain::foundation::{CommandMetadata, PostId, UserId};

#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub user_id: UserId,
    pub post_id: PostId,
    pub title: Option<String>,
    pub content: Option<String>,
}

pub struct UpdatePostHandler {
    gate: PolicyGate,
}

impl UpdatePostHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    pub async fn handle(
        &self,
        cmd: UpdatePostCommand,
        metadata: CommandMetadata,
    ) -> Result<Post, PortalError> {
        let caller = self.gate.caller(cmd.user_id).await?;
        let mut post = self.gate.select_post(&caller, cmd.post_id).await?;

        post.edit(cmd.title.as_deref(), cmd.content.as_deref())?;
        self.gate.update_post(&caller, &post).await?;

        tracing::info!(
            post_id = %cmd.post_id,
            correlation_id = %metadata.correlation_id(),
            "post updated"
        );
        Ok(post)
    }
}
