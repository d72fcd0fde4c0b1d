//! Auth identity: the account a bearer token refers to.
//!
//! The identity row is owned by the service surface. Its metadata is a free
//! JSON object supplied at sign-up; only the `name` and `role` keys are read,
//! and only once, when the profile is bootstrapped.

use crate::domain::foundation::{require_text, Timestamp, UserId, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{UserRole, MAX_PROFILE_NAME_LENGTH};

/// Maximum length for an email address. Bounded by the profile name limit
/// because the email doubles as the default profile name.
pub const MAX_EMAIL_LENGTH: usize = MAX_PROFILE_NAME_LENGTH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthIdentity {
    id: UserId,
    email: String,
    metadata: Value,
    created_at: Timestamp,
}

impl AuthIdentity {
    /// Creates a new identity with a generated id.
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `TooLong` if the email is blank or oversized
    /// - `InvalidFormat` if the email has no `@` or metadata is not an object
    /// - `TooLong` if the metadata `name` exceeds the profile name limit
    pub fn new(email: &str, metadata: Option<Value>) -> Result<Self, ValidationError> {
        Self::with_id(UserId::new(), email, metadata)
    }

    /// Creates an identity with a caller-chosen id (e.g. from an external IdP).
    pub fn with_id(id: UserId, email: &str, metadata: Option<Value>) -> Result<Self, ValidationError> {
        let email = require_text("email", email, Some(MAX_EMAIL_LENGTH))?;
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @"));
        }

        let metadata = match metadata {
            None | Some(Value::Null) => Value::Object(Default::default()),
            Some(Value::Object(map)) => Value::Object(map),
            Some(_) => {
                return Err(ValidationError::invalid_format(
                    "metadata",
                    "must be a JSON object",
                ))
            }
        };

        if let Some(name) = metadata.get("name").and_then(Value::as_str) {
            if !name.trim().is_empty() {
                require_text("name", name, Some(MAX_PROFILE_NAME_LENGTH))?;
            }
        }

        Ok(Self {
            id,
            email,
            metadata,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute an identity from persistence.
    pub fn reconstitute(id: UserId, email: String, metadata: Value, created_at: Timestamp) -> Self {
        Self {
            id,
            email,
            metadata,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn metadata(&self) -> &Value {
        &self.metadata
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// The `name` metadata key, if present and not blank.
    pub fn requested_name(&self) -> Option<&str> {
        self.metadata
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Teacher only when metadata says exactly `"teacher"`.
    pub fn requested_role(&self) -> UserRole {
        match self.metadata.get("role").and_then(Value::as_str) {
            Some("teacher") => UserRole::Teacher,
            _ => UserRole::Student,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_metadata_becomes_empty_object() {
        let identity = AuthIdentity::new("kid@school.test", None).unwrap();
        assert_eq!(identity.metadata(), &json!({}));
        assert_eq!(identity.requested_name(), None);
        assert_eq!(identity.requested_role(), UserRole::Student);
    }

    #[test]
    fn reads_name_and_teacher_role() {
        let identity = AuthIdentity::new(
            "t@school.test",
            Some(json!({"name": "Ms. Rivera", "role": "teacher"})),
        )
        .unwrap();
        assert_eq!(identity.requested_name(), Some("Ms. Rivera"));
        assert_eq!(identity.requested_role(), UserRole::Teacher);
    }

    #[test]
    fn role_match_is_exact() {
        for role in [json!("Teacher"), json!("admin"), json!(1), json!(null)] {
            let identity =
                AuthIdentity::new("x@school.test", Some(json!({ "role": role }))).unwrap();
            assert_eq!(identity.requested_role(), UserRole::Student);
        }
    }

    #[test]
    fn blank_name_is_ignored() {
        let identity =
            AuthIdentity::new("x@school.test", Some(json!({"name": "   "}))).unwrap();
        assert_eq!(identity.requested_name(), None);
    }

    #[test]
    fn rejects_non_object_metadata() {
        let err = AuthIdentity::new("x@school.test", Some(json!(["a"]))).unwrap_err();
        assert_eq!(err.field(), "metadata");
    }

    #[test]
    fn rejects_oversized_metadata_name() {
        let err = AuthIdentity::new("x@school.test", Some(json!({"name": "x".repeat(101)})))
            .unwrap_err();
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn rejects_email_longer_than_a_profile_name() {
        let email = format!("{}@school.test", "a".repeat(MAX_PROFILE_NAME_LENGTH));
        let err = AuthIdentity::new(&email, None).unwrap_err();
        assert_eq!(err.field(), "email");
    }

    #[test]
    fn rejects_email_without_at() {
        assert!(AuthIdentity::new("not-an-email", None).is_err());
    }
}
