//! Portal-level error type returned by every caller-facing operation.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// Row absent, or hidden from the caller by a read policy.
    NotFound(String),
    /// A write policy evaluated false.
    Forbidden(String),
    /// Uniqueness or foreign key violation.
    ConstraintViolation(String),
    /// Form validation failed.
    ValidationFailed { field: String, message: String },
    /// Store or network failure.
    Infrastructure(String),
}

impl PortalError {
    pub fn not_found(what: impl Into<String>) -> Self {
        PortalError::NotFound(what.into())
    }
    pub fn forbidden(reason: impl Into<String>) -> Self {
        PortalError::Forbidden(reason.into())
    }
    pub fn constraint(message: impl Into<String>) -> Self {
        PortalError::ConstraintViolation(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PortalError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        PortalError::Infrastructure(message.into())
    }
    pub fn code(&self) -> &'static str {
        match self {
            PortalError::NotFound(_) => "NOT_FOUND",
            PortalError::Forbidden(_) => "FORBIDDEN",
            PortalError::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            PortalError::ValidationFailed { .. } => "VALIDATION_FAILED",
            PortalError::Infrastructure(_) => "INFRASTRUCTURE_ERROR",
        }
    }
    pub fn message(&self) -> String {
        match self {
            PortalError::NotFound(what) => format!("Not found: {}", what),
            PortalError::Forbidden(reason) => format!("Permission denied: {}", reason),
            PortalError::ConstraintViolation(msg) => format!("Constraint violation: {}", msg),
            PortalError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PortalError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PortalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PortalError {}

impl From<DomainError> for PortalError {
    fn from(err: DomainError) -> Self {
        match err.code {
            code if code.is_not_found() => PortalError::NotFound(err.message),
            code if code.is_constraint() => PortalError::ConstraintViolation(err.message),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => PortalError::Forbidden(err.message),
            ErrorCode::ValidationFailed => PortalError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => PortalError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for PortalError {
    fn from(err: ValidationError) -> Self {
        PortalError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
