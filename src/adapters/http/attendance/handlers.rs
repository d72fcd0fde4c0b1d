//! HTTP handlers for attendance endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::portal_error_response;
use crate::adapters::http::extract::{ApiJson, ApiQuery};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::request_context::user_metadata;
use crate::application::handlers::attendance::{
    AttendanceSummaryHandler, AttendanceSummaryQuery, DeleteAttendanceCommand,
    DeleteAttendanceHandler, ListAttendanceHandler, ListAttendanceQuery, MarkAttendanceCommand,
    MarkAttendanceHandler,
};
use crate::application::PolicyGate;

use super::dto::{
    AttendanceKeyParams, AttendanceListParams, AttendanceResponse, MarkAttendanceRequest,
    SummaryParams,
};

#[derive(Clone)]
pub struct AttendanceHandlers {
    list_handler: Arc<ListAttendanceHandler>,
    mark_handler: Arc<MarkAttendanceHandler>,
    summary_handler: Arc<AttendanceSummaryHandler>,
    delete_handler: Arc<DeleteAttendanceHandler>,
}

impl AttendanceHandlers {
    pub fn new(gate: PolicyGate) -> Self {
        Self {
            list_handler: Arc::new(ListAttendanceHandler::new(gate.clone())),
            mark_handler: Arc::new(MarkAttendanceHandler::new(gate.clone())),
            summary_handler: Arc::new(AttendanceSummaryHandler::new(gate.clone())),
            delete_handler: Arc::new(DeleteAttendanceHandler::new(gate)),
        }
    }
}

/// GET /api/attendance?date=&student_id=
pub async fn list_attendance(
    State(handlers): State<AttendanceHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<AttendanceListParams>,
) -> Response {
    let query = ListAttendanceQuery {
        user_id: user.id,
        date: params.date,
        student_id: params.student_id,
    };
    match handlers.list_handler.handle(query).await {
        Ok(records) => {
            let body: Vec<AttendanceResponse> = records.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => portal_error_response(e),
    }
}

/// PUT /api/attendance - insert or overwrite the status for (student, date).
pub async fn mark_attendance(
    State(handlers): State<AttendanceHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    ApiJson(req): ApiJson<MarkAttendanceRequest>,
) -> Response {
    let cmd = MarkAttendanceCommand {
        user_id: user.id,
        student_id: req.student_id,
        date: req.date,
        status: req.status,
    };
    match handlers
        .mark_handler
        .handle(cmd, user_metadata(&user, &headers))
        .await
    {
        Ok(record) => (StatusCode::OK, Json(AttendanceResponse::from(record))).into_response(),
        Err(e) => portal_error_response(e),
    }
}

/// GET /api/attendance/summary?student_id=
pub async fn attendance_summary(
    State(handlers): State<AttendanceHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<SummaryParams>,
) -> Response {
    let query = AttendanceSummaryQuery {
        user_id: user.id,
        student_id: params.student_id,
    };
    match handlers.summary_handler.handle(query).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => portal_error_response(e),
    }
}

/// DELETE /api/attendance?student_id=&date= - never succeeds.
pub async fn delete_attendance(
    State(handlers): State<AttendanceHandlers>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<AttendanceKeyParams>,
) -> Response {
    let cmd = DeleteAttendanceCommand {
        user_id: user.id,
        student_id: params.student_id,
        date: params.date,
    };
    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => portal_error_response(e),
    }
}
