//! HTTP DTOs for class and roster endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::classroom::{Class, RosterEntry};
use crate::domain::foundation::{ClassId, Timestamp, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassResponse {
    pub id: ClassId,
    pub name: String,
    pub created_at: Timestamp,
}

impl From<Class> for ClassResponse {
    fn from(class: Class) -> Self {
        Self {
            id: class.id(),
            name: class.name().to_string(),
            created_at: *class.created_at(),
        }
    }
}

/// Teachers see only id and name of their students.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntryResponse {
    pub id: UserId,
    pub name: String,
}

impl From<RosterEntry> for RosterEntryResponse {
    fn from(entry: RosterEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
        }
    }
}
