//! HTTP DTOs for service-key endpoints.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::foundation::{ClassId, UserId};

/// Payload of the identity bootstrap hook.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterIdentityRequest {
    #[serde(default)]
    pub id: Option<UserId>,
    pub email: String,
    /// Free-form user metadata; `name` and `role` are read from it.
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// `null` removes the profile from its class.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignClassRequest {
    pub class_id: Option<ClassId>,
}
