//! Shared error body and `PortalError` to HTTP status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::classroom::PortalError;

/// JSON error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHENTICATED", message)
    }
}

impl From<&PortalError> for ErrorResponse {
    fn from(error: &PortalError) -> Self {
        let mut body = Self::new(error.code(), error.message());
        match error {
            PortalError::ValidationFailed { field, .. } => {
                body.details = Some(serde_json::json!({ "field": field }));
            }
            PortalError::Infrastructure(_) => {
                body.message = "Service temporarily unavailable".to_string();
            }
            _ => {}
        }
        body
    }
}

pub fn status_for(error: &PortalError) -> StatusCode {
    match error {
        PortalError::NotFound(_) => StatusCode::NOT_FOUND,
        PortalError::Forbidden(_) => StatusCode::FORBIDDEN,
        PortalError::ConstraintViolation(_) => StatusCode::CONFLICT,
        PortalError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        PortalError::Infrastructure(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Converts a handler failure into a response, logging store failures.
pub fn portal_error_response(error: PortalError) -> Response {
    if let PortalError::Infrastructure(detail) = &error {
        tracing::error!(error = %detail, "request failed on infrastructure");
    }
    (status_for(&error), Json(ErrorResponse::from(&error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(status_for(&PortalError::not_found("post")), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&PortalError::forbidden("no")), StatusCode::FORBIDDEN);
        assert_eq!(status_for(&PortalError::constraint("dup")), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&PortalError::validation("title", "empty")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&PortalError::infrastructure("pool closed")),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn infrastructure_detail_is_not_leaked() {
        let body = ErrorResponse::from(&PortalError::infrastructure("password=hunter2"));
        assert_eq!(body.code, "INFRASTRUCTURE_ERROR");
        assert!(!body.message.contains("hunter2"));
    }

    #[test]
    fn validation_carries_field() {
        let body = ErrorResponse::from(&PortalError::validation("title", "empty"));
        assert_eq!(body.details, Some(serde_json::json!({ "field": "title" })));
    }
}
