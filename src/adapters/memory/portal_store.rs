//! In-memory portal store.
//!
//! Enforces the same keys and constraints as the SQL schema. All tables sit
//! behind one lock so each call is atomic, including the identity+profile
//! insert and the attendance upsert.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::classroom::{AttendanceRecord, AuthIdentity, Class, Post, Profile, SEED_CLASS_NAMES};
use crate::domain::foundation::{ClassId, DomainError, ErrorCode, PostId, UserId};
use crate::domain::policy::AttendanceRow;
use crate::ports::PortalStore;

#[derive(Debug, Default)]
struct Tables {
    identities: HashMap<UserId, AuthIdentity>,
    classes: HashMap<ClassId, Class>,
    profiles: HashMap<UserId, Profile>,
    posts: HashMap<PostId, Post>,
    attendance: HashMap<(UserId, NaiveDate), AttendanceRecord>,
}

impl Tables {
    fn attendance_row(&self, record: &AttendanceRecord) -> AttendanceRow {
        let student_class_id = self
            .profiles
            .get(&record.student_id())
            .and_then(Profile::class_id);
        AttendanceRow::new(record.clone(), student_class_id)
    }

    fn upsert_attendance(&mut self, record: &AttendanceRecord) -> Result<AttendanceRecord, DomainError> {
        if !self.profiles.contains_key(&record.student_id()) {
            return Err(fk_violation(format!(
                "profile {} does not exist",
                record.student_id()
            )));
        }

        let stored = self
            .attendance
            .entry((record.student_id(), record.date()))
            .and_modify(|existing| existing.set_status(record.status()))
            .or_insert_with(|| record.clone());
        Ok(stored.clone())
    }

    fn profile_is_referenced(&self, id: &UserId) -> bool {
        self.posts.values().any(|p| p.teacher_id() == *id)
            || self.attendance.keys().any(|(student_id, _)| student_id == id)
    }
}

fn fk_violation(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::ForeignKeyViolation, message)
}

fn newest_first(rows: &mut [AttendanceRow]) {
    rows.sort_by(|a, b| {
        b.record
            .date()
            .cmp(&a.record.date())
            .then_with(|| a.record.student_id().cmp(&b.record.student_id()))
    });
}

/// In-memory implementation of [`PortalStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryPortalStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryPortalStore {
    /// Empty store with no classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the three seed classes, like a freshly migrated database.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        for name in SEED_CLASS_NAMES {
            if let Ok(class) = Class::new(name) {
                tables.classes.insert(class.id(), class);
            }
        }
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Adds a class directly (fixtures only; there is no class-creation operation).
    pub async fn add_class(&self, class: Class) {
        self.tables.write().await.classes.insert(class.id(), class);
    }

    pub async fn attendance_count(&self) -> usize {
        self.tables.read().await.attendance.len()
    }

    pub async fn profile_count(&self) -> usize {
        self.tables.read().await.profiles.len()
    }
}

#[async_trait]
impl PortalStore for InMemoryPortalStore {
    async fn insert_identity(
        &self,
        identity: &AuthIdentity,
        profile: &Profile,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;

        if tables.identities.contains_key(&identity.id()) {
            return Err(DomainError::new(
                ErrorCode::UniqueViolation,
                format!("identity {} already exists", identity.id()),
            ));
        }
        let email = identity.email().to_lowercase();
        if tables
            .identities
            .values()
            .any(|existing| existing.email().to_lowercase() == email)
        {
            return Err(DomainError::new(
                ErrorCode::UniqueViolation,
                format!("email {} already registered", identity.email()),
            ));
        }
        if tables.profiles.contains_key(&profile.id()) {
            return Err(DomainError::new(
                ErrorCode::UniqueViolation,
                format!("profile {} already exists", profile.id()),
            ));
        }

        tables.identities.insert(identity.id(), identity.clone());
        tables.profiles.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn find_identity(&self, id: &UserId) -> Result<Option<AuthIdentity>, DomainError> {
        Ok(self.tables.read().await.identities.get(id).cloned())
    }

    async fn delete_identity(&self, id: &UserId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.identities.contains_key(id) {
            return Err(DomainError::new(
                ErrorCode::IdentityNotFound,
                format!("identity {}", id),
            ));
        }
        if tables.profile_is_referenced(id) {
            return Err(fk_violation(format!(
                "profile {} is still referenced by posts or attendance",
                id
            )));
        }

        tables.identities.remove(id);
        tables.profiles.remove(id);
        Ok(())
    }

    async fn list_classes(&self) -> Result<Vec<Class>, DomainError> {
        let tables = self.tables.read().await;
        let mut classes: Vec<Class> = tables.classes.values().cloned().collect();
        classes.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(classes)
    }

    async fn find_class(&self, id: &ClassId) -> Result<Option<Class>, DomainError> {
        Ok(self.tables.read().await.classes.get(id).cloned())
    }

    async fn find_profile(&self, id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.tables.read().await.profiles.get(id).cloned())
    }

    async fn update_profile(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;

        if let Some(class_id) = profile.class_id() {
            if !tables.classes.contains_key(&class_id) {
                return Err(fk_violation(format!("class {} does not exist", class_id)));
            }
        }

        let stored = tables.profiles.get_mut(&profile.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::ProfileNotFound, format!("profile {}", profile.id()))
        })?;

        *stored = Profile::reconstitute(
            stored.id(),
            profile.name().to_string(),
            stored.role(),
            profile.class_id(),
            *stored.created_at(),
            *profile.updated_at(),
        );
        Ok(())
    }

    async fn list_profiles_in_class(&self, class_id: &ClassId) -> Result<Vec<Profile>, DomainError> {
        let tables = self.tables.read().await;
        let mut profiles: Vec<Profile> = tables
            .profiles
            .values()
            .filter(|p| p.class_id() == Some(*class_id))
            .cloned()
            .collect();
        profiles.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
        Ok(profiles)
    }

    async fn insert_post(&self, post: &Post) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.profiles.contains_key(&post.teacher_id()) {
            return Err(fk_violation(format!("profile {} does not exist", post.teacher_id())));
        }
        if !tables.classes.contains_key(&post.class_id()) {
            return Err(fk_violation(format!("class {} does not exist", post.class_id())));
        }
        if tables.posts.contains_key(&post.id()) {
            return Err(DomainError::new(
                ErrorCode::UniqueViolation,
                format!("post {} already exists", post.id()),
            ));
        }

        tables.posts.insert(post.id(), post.clone());
        Ok(())
    }

    async fn find_post(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        Ok(self.tables.read().await.posts.get(id).cloned())
    }

    async fn update_post(&self, post: &Post) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .posts
            .get_mut(&post.id())
            .ok_or_else(|| DomainError::new(ErrorCode::PostNotFound, format!("post {}", post.id())))?;

        *stored = Post::reconstitute(
            stored.id(),
            stored.teacher_id(),
            stored.class_id(),
            post.title().to_string(),
            post.content().to_string(),
            *stored.created_at(),
        );
        Ok(())
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), DomainError> {
        self.tables
            .write()
            .await
            .posts
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::new(ErrorCode::PostNotFound, format!("post {}", id)))
    }

    async fn list_posts_in_class(&self, class_id: &ClassId) -> Result<Vec<Post>, DomainError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| p.class_id() == *class_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(posts)
    }

    async fn upsert_attendance(
        &self,
        record: &AttendanceRecord,
    ) -> Result<AttendanceRecord, DomainError> {
        let mut tables = self.tables.write().await;
        tables.upsert_attendance(record)
    }

    async fn upsert_attendance_in_class(
        &self,
        record: &AttendanceRecord,
        class_id: Option<ClassId>,
    ) -> Result<AttendanceRecord, DomainError> {
        let mut tables = self.tables.write().await;

        if let Some(profile) = tables.profiles.get(&record.student_id()) {
            if profile.class_id() != class_id {
                return Err(DomainError::new(
                    ErrorCode::Forbidden,
                    format!("student {} changed class", record.student_id()),
                ));
            }
        }
        tables.upsert_attendance(record)
    }

    async fn find_attendance(
        &self,
        student_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRow>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .attendance
            .get(&(*student_id, date))
            .map(|record| tables.attendance_row(record)))
    }

    async fn list_attendance_for_student(
        &self,
        student_id: &UserId,
    ) -> Result<Vec<AttendanceRow>, DomainError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AttendanceRow> = tables
            .attendance
            .values()
            .filter(|r| r.student_id() == *student_id)
            .map(|r| tables.attendance_row(r))
            .collect();
        newest_first(&mut rows);
        Ok(rows)
    }

    async fn list_attendance_for_class(
        &self,
        class_id: &ClassId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRow>, DomainError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AttendanceRow> = tables
            .attendance
            .values()
            .filter(|r| date.map_or(true, |d| r.date() == d))
            .map(|r| tables.attendance_row(r))
            .filter(|row| row.student_class_id == Some(*class_id))
            .collect();
        newest_first(&mut rows);
        Ok(rows)
    }
}
