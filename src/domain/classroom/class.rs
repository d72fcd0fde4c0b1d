//! Class entity.

use crate::domain::foundation::{require_text, ClassId, Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Maximum length for a class name.
pub const MAX_CLASS_NAME_LENGTH: usize = 100;

/// Classes created by the initial migration.
pub const SEED_CLASS_NAMES: [&str; 3] = ["Class 10A", "Class 10B", "Class 11A"];

/// A teaching group. Profiles point at it through their `class_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    id: ClassId,
    name: String,
    created_at: Timestamp,
}

impl Class {
    /// Creates a new class with a generated id.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = require_text("name", name, Some(MAX_CLASS_NAME_LENGTH))?;
        Ok(Self {
            id: ClassId::new(),
            name,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a class from persistence.
    pub fn reconstitute(id: ClassId, name: String, created_at: Timestamp) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
