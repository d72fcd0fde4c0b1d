//! HTTP handlers for service-key endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::classroom::ClassResponse;
use crate::adapters::http::error::portal_error_response;
use crate::adapters::http::extract::{ApiJson, ApiPath};
use crate::adapters::http::profile::ProfileResponse;
use crate::adapters::http::request_context::service_metadata;
use crate::application::handlers::identity::{
    AssignClassCommand, AssignClassHandler, ListClassesHandler, RegisterIdentityCommand,
    RegisterIdentityHandler, RemoveIdentityCommand, RemoveIdentityHandler,
};
use crate::domain::foundation::UserId;
use crate::ports::PortalStore;

use super::dto::{AssignClassRequest, RegisterIdentityRequest};

#[derive(Clone)]
pub struct ServiceHandlers {
    register_handler: Arc<RegisterIdentityHandler>,
    remove_handler: Arc<RemoveIdentityHandler>,
    assign_handler: Arc<AssignClassHandler>,
    classes_handler: Arc<ListClassesHandler>,
}

impl ServiceHandlers {
    pub fn new(store: Arc<dyn PortalStore>) -> Self {
        Self {
            register_handler: Arc::new(RegisterIdentityHandler::new(store.clone())),
            remove_handler: Arc::new(RemoveIdentityHandler::new(store.clone())),
            assign_handler: Arc::new(AssignClassHandler::new(store.clone())),
            classes_handler: Arc::new(ListClassesHandler::new(store)),
        }
    }
}

/// POST /service/identities - creates the identity and its profile.
pub async fn register_identity(
    State(handlers): State<ServiceHandlers>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<RegisterIdentityRequest>,
) -> Response {
    let cmd = RegisterIdentityCommand {
        email: req.email,
        metadata: req.metadata,
        id: req.id,
    };
    match handlers
        .register_handler
        .handle(cmd, service_metadata(&headers))
        .await
    {
        Ok(profile) => (StatusCode::CREATED, Json(ProfileResponse::from(profile))).into_response(),
        Err(e) => portal_error_response(e),
    }
}

/// DELETE /service/identities/:id
pub async fn remove_identity(
    State(handlers): State<ServiceHandlers>,
    ApiPath(id): ApiPath<UserId>,
    headers: HeaderMap,
) -> Response {
    match handlers
        .remove_handler
        .handle(RemoveIdentityCommand { id }, service_metadata(&headers))
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => portal_error_response(e),
    }
}

/// PUT /service/profiles/:id/class
pub async fn assign_class(
    State(handlers): State<ServiceHandlers>,
    ApiPath(profile_id): ApiPath<UserId>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<AssignClassRequest>,
) -> Response {
    let cmd = AssignClassCommand {
        profile_id,
        class_id: req.class_id,
    };
    match handlers
        .assign_handler
        .handle(cmd, service_metadata(&headers))
        .await
    {
        Ok(profile) => (StatusCode::OK, Json(ProfileResponse::from(profile))).into_response(),
        Err(e) => portal_error_response(e),
    }
}

/// GET /service/classes
pub async fn list_classes(State(handlers): State<ServiceHandlers>) -> Response {
    match handlers.classes_handler.handle().await {
        Ok(classes) => {
            let body: Vec<ClassResponse> = classes.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => portal_error_response(e),
    }
}
