//! HTTP DTOs for post endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::classroom::Post;
use crate::domain::foundation::{ClassId, PostId, Timestamp, UserId};

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    /// Defaults to the author's class.
    #[serde(default)]
    pub class_id: Option<ClassId>,
}

/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: PostId,
    pub teacher_id: UserId,
    pub class_id: ClassId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id(),
            teacher_id: post.teacher_id(),
            class_id: post.class_id(),
            title: post.title().to_string(),
            content: post.content().to_string(),
            created_at: *post.created_at(),
        }
    }
}
