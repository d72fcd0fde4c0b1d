//! HTTP handlers for class and roster endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::portal_error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::classroom::{
    GetClassHandler, GetClassQuery, GetRosterHandler, GetRosterQuery,
};
use crate::application::PolicyGate;

use super::dto::{ClassResponse, RosterEntryResponse};

#[derive(Clone)]
pub struct ClassroomHandlers {
    class_handler: Arc<GetClassHandler>,
    roster_handler: Arc<GetRosterHandler>,
}

impl ClassroomHandlers {
    pub fn new(gate: PolicyGate) -> Self {
        Self {
            class_handler: Arc::new(GetClassHandler::new(gate.clone())),
            roster_handler: Arc::new(GetRosterHandler::new(gate)),
        }
    }
}

/// GET /api/class
pub async fn get_class(
    State(handlers): State<ClassroomHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .class_handler
        .handle(GetClassQuery { user_id: user.id })
        .await
    {
        Ok(class) => (StatusCode::OK, Json(ClassResponse::from(class))).into_response(),
        Err(e) => portal_error_response(e),
    }
}

/// GET /api/roster - empty for students and unassigned teachers.
pub async fn get_roster(
    State(handlers): State<ClassroomHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .roster_handler
        .handle(GetRosterQuery { user_id: user.id })
        .await
    {
        Ok(roster) => {
            let body: Vec<RosterEntryResponse> = roster.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => portal_error_response(e),
    }
}
