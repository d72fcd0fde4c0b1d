//! ListPostsHandler - posts of the caller's class, newest first.

use crate::application::PolicyGate;
use crate::domain::classroom::{PortalError, Post};
use crate::domain::foundation::UserId;

#[derive(Debug, Clone)]
pub struct ListPostsQuery {
    pub user_id: UserId,
}

pub struct ListPostsHandler {
    gate: PolicyGate,
}

impl ListPostsHandler {
    pub fn new(gate: PolicyGate) -> Self {
        Self { gate }
    }

    pub async fn handle(&self, query: ListPostsQuery) -> Result<Vec<Post>, PortalError> {
        let caller = self.gate.caller(query.user_id).await?;
        self.gate.select_posts(&caller).await
    }
}
