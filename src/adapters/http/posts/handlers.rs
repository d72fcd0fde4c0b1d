//! HTTP handlers for post endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::portal_error_response;
use crate::adapters::http::extract::{ApiJson, ApiPath};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::request_context::user_metadata;
use crate::application::handlers::post::{
    CreatePostCommand, CreatePostHandler, DeletePostCommand, DeletePostHandler, ListPostsHandler,
    ListPostsQuery, UpdatePostCommand, UpdatePostHandler,
};
use crate::application::PolicyGate;
use crate::domain::foundation::PostId;

use super::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

#[derive(Clone)]
pub struct PostHandlers {
    list_handler: Arc<ListPostsHandler>,
    create_handler: Arc<CreatePostHandler>,
    update_handler: Arc<UpdatePostHandler>,
    delete_handler: Arc<DeletePostHandler>,
}

impl PostHandlers {
    pub fn new(gate: PolicyGate) -> Self {
        Self {
            list_handler: Arc::new(ListPostsHandler::new(gate.clone())),
            create_handler: Arc::new(CreatePostHandler::new(gate.clone())),
            update_handler: Arc::new(UpdatePostHandler::new(gate.clone())),
            delete_handler: Arc::new(DeletePostHandler::new(gate)),
        }
    }
}

/// GET /api/posts - class feed, newest first.
pub async fn list_posts(
    State(handlers): State<PostHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .list_handler
        .handle(ListPostsQuery { user_id: user.id })
        .await
    {
        Ok(posts) => {
            let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => portal_error_response(e),
    }
}

/// POST /api/posts
pub async fn create_post(
    State(handlers): State<PostHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> Response {
    let cmd = CreatePostCommand {
        user_id: user.id,
        class_id: req.class_id,
        title: req.title,
        content: req.content,
    };
    match handlers
        .create_handler
        .handle(cmd, user_metadata(&user, &headers))
        .await
    {
        Ok(post) => (StatusCode::CREATED, Json(PostResponse::from(post))).into_response(),
        Err(e) => portal_error_response(e),
    }
}

/// PATCH /api/posts/:id
pub async fn update_post(
    State(handlers): State<PostHandlers>,
    RequireAuth(user): RequireAuth,
    ApiPath(post_id): ApiPath<PostId>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<UpdatePostRequest>,
) -> Response {
    let cmd = UpdatePostCommand {
        user_id: user.id,
        post_id,
        title: req.title,
        content: req.content,
    };
    match handlers
        .update_handler
        .handle(cmd, user_metadata(&user, &headers))
        .await
    {
        Ok(post) => (StatusCode::OK, Json(PostResponse::from(post))).into_response(),
        Err(e) => portal_error_response(e),
    }
}

/// DELETE /api/posts/:id
pub async fn delete_post(
    State(handlers): State<PostHandlers>,
    RequireAuth(user): RequireAuth,
    ApiPath(post_id): ApiPath<PostId>,
    headers: HeaderMap,
) -> Response {
    let cmd = DeletePostCommand {
        user_id: user.id,
        post_id,
    };
    match handlers
        .delete_handler
        .handle(cmd, user_metadata(&user, &headers))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => portal_error_response(e),
    }
}
