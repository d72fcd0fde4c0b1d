//! Profile entity and the role enumeration.

use crate::domain::foundation::{
    require_text, ClassId, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AuthIdentity;

/// Maximum length for a profile name edited by its owner.
pub const MAX_PROFILE_NAME_LENGTH: usize = 100;

/// Role of a portal user. Fixed at bootstrap; never user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
        }
    }

    pub fn is_teacher(&self) -> bool {
        matches!(self, UserRole::Teacher)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "teacher" => Ok(UserRole::Teacher),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Per-user record. Its id is the identity id.
///
/// # Invariants
///
/// - exactly one profile per identity, created by [`Profile::bootstrap`]
/// - `role` never changes after creation
/// - `updated_at` moves forward on every mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: UserId,
    name: String,
    role: UserRole,
    class_id: Option<ClassId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Profile {
    /// Derives the initial profile of a freshly registered identity.
    ///
    /// Name falls back to the email; role defaults to student; no class.
    pub fn bootstrap(identity: &AuthIdentity) -> Self {
        let now = Timestamp::now();
        Self {
            id: identity.id(),
            name: identity
                .requested_name()
                .unwrap_or(identity.email())
                .to_string(),
            role: identity.requested_role(),
            class_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a profile from persistence.
    pub fn reconstitute(
        id: UserId,
        name: String,
        role: UserRole,
        class_id: Option<ClassId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            role,
            class_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn class_id(&self) -> Option<ClassId> {
        self.class_id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_teacher(&self) -> bool {
        self.role.is_teacher()
    }

    /// Changes the display name.
    pub fn rename(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = require_text("name", name, Some(MAX_PROFILE_NAME_LENGTH))?;
        self.touch();
        Ok(())
    }

    /// Places the profile in a class, or removes it from any class.
    pub fn assign_class(&mut self, class_id: Option<ClassId>) {
        self.class_id = class_id;
        self.touch();
    }

    /// Refreshes `updated_at`; never moves it backwards.
    pub fn touch(&mut self) {
        let now = Timestamp::now();
        if now.is_after(&self.updated_at) {
            self.updated_at = now;
        }
    }

    /// Id/name projection shown to teachers of the same class.
    pub fn roster_entry(&self) -> RosterEntry {
        RosterEntry {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Roster line: the only part of a student's profile a teacher may read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: UserId,
    pub name: String,
}
