//! HTTP DTOs for profile endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::classroom::{Profile, UserRole};
use crate::domain::foundation::{ClassId, Timestamp, UserId};

/// Only the display name is user-editable.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub name: String,
    pub role: UserRole,
    pub class_id: Option<ClassId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id(),
            name: profile.name().to_string(),
            role: profile.role(),
            class_id: profile.class_id(),
            created_at: *profile.created_at(),
            updated_at: *profile.updated_at(),
        }
    }
}
