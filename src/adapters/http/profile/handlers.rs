//! HTTP handlers for profile endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::portal_error_response;
use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::request_context::user_metadata;
use crate::application::handlers::profile::{
    GetProfileHandler, GetProfileQuery, UpdateProfileCommand, UpdateProfileHandler,
};
use crate::application::PolicyGate;

use super::dto::{ProfileResponse, UpdateProfileRequest};

#[derive(Clone)]
pub struct ProfileHandlers {
    get_handler: Arc<GetProfileHandler>,
    update_handler: Arc<UpdateProfileHandler>,
}

impl ProfileHandlers {
    pub fn new(gate: PolicyGate) -> Self {
        Self {
            get_handler: Arc::new(GetProfileHandler::new(gate.clone())),
            update_handler: Arc::new(UpdateProfileHandler::new(gate)),
        }
    }
}

/// GET /api/profile
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .get_handler
        .handle(GetProfileQuery { user_id: user.id })
        .await
    {
        Ok(profile) => (StatusCode::OK, Json(ProfileResponse::from(profile))).into_response(),
        Err(e) => portal_error_response(e),
    }
}

/// PATCH /api/profile
pub async fn update_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> Response {
    let cmd = UpdateProfileCommand {
        user_id: user.id,
        name: req.name,
    };
    match handlers
        .update_handler
        .handle(cmd, user_metadata(&user, &headers))
        .await
    {
        Ok(profile) => (StatusCode::OK, Json(ProfileResponse::from(profile))).into_response(),
        Err(e) => portal_error_response(e),
    }
}
