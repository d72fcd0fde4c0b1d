//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the portal domain.

mod auth;
mod authorization;
mod command;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use authorization::AuthorizationResult;
pub use command::CommandMetadata;
pub use errors::{require_text, DomainError, ErrorCode, ValidationError};
pub use ids::{AttendanceId, ClassId, PostId, UserId};
pub use timestamp::Timestamp;
