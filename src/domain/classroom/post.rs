//! Class post: an announcement a teacher writes for their class.

use crate::domain::foundation::{
    require_text, ClassId, PostId, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Maximum length for a post title.
pub const MAX_POST_TITLE_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    teacher_id: UserId,
    class_id: ClassId,
    title: String,
    content: String,
    created_at: Timestamp,
}

impl Post {
    /// Drafts a new post. Whether the author may publish it into `class_id`
    /// is decided by the insert policy, not here.
    pub fn compose(
        teacher_id: UserId,
        class_id: ClassId,
        title: &str,
        content: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: PostId::new(),
            teacher_id,
            class_id,
            title: require_text("title", title, Some(MAX_POST_TITLE_LENGTH))?,
            content: require_text("content", content, None)?,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a post from persistence.
    pub fn reconstitute(
        id: PostId,
        teacher_id: UserId,
        class_id: ClassId,
        title: String,
        content: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            teacher_id,
            class_id,
            title,
            content,
            created_at,
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn teacher_id(&self) -> UserId {
        self.teacher_id
    }

    pub fn class_id(&self) -> ClassId {
        self.class_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Replaces title and/or content. Either both validate or nothing changes.
    pub fn edit(&mut self, title: Option<&str>, content: Option<&str>) -> Result<(), ValidationError> {
        let title = title
            .map(|t| require_text("title", t, Some(MAX_POST_TITLE_LENGTH)))
            .transpose()?;
        let content = content
            .map(|c| require_text("content", c, None))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        Ok(())
    }
}
