//! Command infrastructure for CQRS handlers.
//!
//! Handlers accept a single `CommandMetadata` instead of loose
//! `user_id` / `correlation_id` parameters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Metadata context for command handlers.
///
/// Carries the acting identity and the request correlation id. Service-key
/// calls have no acting identity, so `user_id` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The identity executing this command, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "service").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Metadata for a command issued by an authenticated user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            correlation_id: None,
            source: None,
        }
    }

    /// Metadata for a privileged command issued with the service key.
    pub fn service() -> Self {
        Self {
            user_id: None,
            correlation_id: None,
            source: Some("service".to_string()),
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_carries_user() {
        let user_id = UserId::new();
        let metadata = CommandMetadata::new(user_id);

        assert_eq!(metadata.user_id, Some(user_id));
        assert!(metadata.source().is_none());
    }

    #[test]
    fn service_has_no_user() {
        let metadata = CommandMetadata::service();
        assert!(metadata.user_id.is_none());
        assert_eq!(metadata.source(), Some("service"));
    }

    #[test]
    fn correlation_id_returns_set_value() {
        let metadata = CommandMetadata::new(UserId::new()).with_correlation_id("req-1");
        assert_eq!(metadata.correlation_id(), "req-1");
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new(UserId::new());
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn serialization_skips_none_fields() {
        let json = serde_json::to_string(&CommandMetadata::service()).unwrap();
        assert!(!json.contains("user_id"));
        assert!(!json.contains("correlation_id"));
        assert!(json.contains("service"));
    }
}
