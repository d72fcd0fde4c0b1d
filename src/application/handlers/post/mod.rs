//! Post command and query handlers.

mod create_post;
mod delete_post;
mod list_posts;
mod update_post;

pub use create_post::{CreatePostCommand, CreatePostHandler};
pub use delete_post::{DeletePostCommand, DeletePostHandler};
pub use list_posts::{ListPostsHandler, ListPostsQuery};
pub use update_post::{UpdatePostCommand, UpdatePostHandler};
