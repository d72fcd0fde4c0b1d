use crate::domain::classroom::{Profile, UserRole};
use crate::domain::foundation::{ClassId, UserId};

/// Who is asking: the authenticated identity plus a snapshot of its own
/// profile row, which may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    id: UserId,
    profile: Option<Profile>,
}

impl Caller {
    pub fn new(id: UserId, profile: Option<Profile>) -> Self {
        Self { id, profile }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.profile.as_ref().map(Profile::role)
    }

    pub fn class_id(&self) -> Option<ClassId> {
        self.profile.as_ref().and_then(Profile::class_id)
    }

    pub fn is_teacher(&self) -> bool {
        self.role() == Some(UserRole::Teacher)
    }
}
